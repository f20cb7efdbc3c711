//! 通用 UI 组件
//!
//! 对话框、选项行、按钮等通用组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear},
};

use crate::quiz::Mark;

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 选项行：序号 + 文本，按正误标记着色
pub fn option_line(slot: usize, text: &str, mark: Mark) -> Line<'static> {
    let (style, suffix) = match mark {
        Mark::None => (Style::default(), ""),
        Mark::Correct => (
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            "  ✓",
        ),
        Mark::Incorrect => (
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            "  ✗",
        ),
    };
    Line::from(vec![
        Span::styled(format!("[{}] ", slot + 1), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{text}{suffix}"), style),
    ])
}

/// [组件] 可禁用的按钮
pub fn button(label: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(label.to_string(), style)
}
