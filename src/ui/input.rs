//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, Control, Phase};

/// 根据当前阶段和按键获取对应的 Action
pub fn get_action(phase: &Phase, key: KeyCode) -> Option<Action> {
    match phase {
        Phase::Loading => match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        },
        Phase::Failed(_) | Phase::Summary => match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Restart),
            _ => None,
        },
        Phase::Quiz => match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char(c @ '1'..='4') => Some(Action::Select(c as usize - '1' as usize)),
            KeyCode::Char('h') | KeyCode::Char('p') | KeyCode::Left => Some(Action::Previous),
            KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right | KeyCode::Enter => {
                Some(Action::Next)
            }
            _ => None,
        },
        Phase::Completed => match key {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Acknowledge),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        },
    }
}

/// 处理按键事件
pub fn handle_key_event(app: &mut App, key: KeyCode) -> Control {
    match get_action(&app.phase, key) {
        Some(action) => app.dispatch(action),
        None => Control::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_keys_map_to_slots() {
        assert_eq!(get_action(&Phase::Quiz, KeyCode::Char('1')), Some(Action::Select(0)));
        assert_eq!(get_action(&Phase::Quiz, KeyCode::Char('4')), Some(Action::Select(3)));
        assert_eq!(get_action(&Phase::Quiz, KeyCode::Char('5')), None);
        assert_eq!(get_action(&Phase::Quiz, KeyCode::Char('0')), None);
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(get_action(&Phase::Quiz, KeyCode::Left), Some(Action::Previous));
        assert_eq!(get_action(&Phase::Quiz, KeyCode::Char('h')), Some(Action::Previous));
        assert_eq!(get_action(&Phase::Quiz, KeyCode::Right), Some(Action::Next));
        assert_eq!(get_action(&Phase::Quiz, KeyCode::Enter), Some(Action::Next));
    }

    #[test]
    fn test_enter_acknowledges_completion() {
        assert_eq!(get_action(&Phase::Completed, KeyCode::Enter), Some(Action::Acknowledge));
        assert_eq!(get_action(&Phase::Completed, KeyCode::Char('1')), None);
    }

    #[test]
    fn test_loading_only_allows_quit() {
        assert_eq!(get_action(&Phase::Loading, KeyCode::Char('1')), None);
        assert_eq!(get_action(&Phase::Loading, KeyCode::Char('r')), None);
        assert_eq!(get_action(&Phase::Loading, KeyCode::Char('q')), Some(Action::Quit));
    }

    #[test]
    fn test_restart_from_failure_and_summary() {
        let failed = Phase::Failed("boom".to_string());
        assert_eq!(get_action(&failed, KeyCode::Char('r')), Some(Action::Restart));
        assert_eq!(get_action(&Phase::Summary, KeyCode::Char('r')), Some(Action::Restart));
        assert_eq!(get_action(&Phase::Quiz, KeyCode::Char('r')), None);
    }
}
