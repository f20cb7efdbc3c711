//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::state::{App, Phase};
use crate::quiz::{QuizSession, Summary};
use components::{button, option_line, render_dialog_framework};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    match (&app.phase, app.session()) {
        (Phase::Loading, _) => render_loading(frame, app),
        (Phase::Failed(error), _) => render_failed(frame, error),
        (Phase::Quiz, Some(session)) => render_quiz(frame, app, session),
        (Phase::Completed, Some(session)) => {
            render_quiz(frame, app, session);
            render_completed_dialog(frame);
        }
        (Phase::Summary, Some(session)) => render_summary(frame, &session.summary()),
        (_, None) => render_loading(frame, app),
    }
}

fn render_loading(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 20, frame.area());
    let inner = render_dialog_framework(frame, area, "Trivia", Color::Cyan);
    let text = format!("正在获取 {} 道题目...\n\n[q] 退出", app.amount);
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        inner,
    );
}

fn render_failed(frame: &mut Frame, error: &str) {
    let area = centered_rect(70, 30, frame.area());
    let inner = render_dialog_framework(frame, area, "⚠️ 获取题目失败", Color::Red);
    let text = format!("{error}\n\n[r] 重新获取  [q] 退出");
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_quiz(frame: &mut Frame, app: &App, session: &QuizSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 进度
            Constraint::Min(5),    // 题目
            Constraint::Length(6), // 选项
            Constraint::Length(3), // 按钮
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_header(frame, session, chunks[0]);
    render_question(frame, session, chunks[1]);
    render_options(frame, session, chunks[2]);
    render_controls(frame, session, chunks[3]);
    render_help(frame, app, chunks[4]);
}

fn render_header(frame: &mut Frame, session: &QuizSession, area: Rect) {
    let question = session.current();
    let mut spans = vec![Span::styled(
        format!("第 {}/{} 题", session.cursor() + 1, session.len()),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    for tag in [&question.category, &question.difficulty] {
        if !tag.is_empty() {
            spans.push(Span::styled(
                format!("  | {tag}"),
                Style::default().fg(Color::Gray),
            ));
        }
    }
    let ledger = session.ledger();
    spans.push(Span::styled(
        format!("  | 得分 {}/{}", ledger.score(), ledger.len()),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().title("🎯 Trivia").borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_question(frame: &mut Frame, session: &QuizSession, area: Rect) {
    let question = Paragraph::new(session.current().text.as_str())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().title("题目").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(question, area);
}

fn render_options(frame: &mut Frame, session: &QuizSession, area: Rect) {
    let question = session.current();
    let lines: Vec<Line> = session
        .options()
        .iter()
        .enumerate()
        .filter_map(|(slot, id)| {
            question
                .option_text(*id)
                .map(|text| option_line(slot, text, session.overlay(*id)))
        })
        .collect();

    let options =
        Paragraph::new(lines).block(Block::default().title("选项").borders(Borders::ALL));
    frame.render_widget(options, area);
}

fn render_controls(frame: &mut Frame, session: &QuizSession, area: Rect) {
    let controls = session.controls();
    let line = Line::from(vec![
        button("◀ [h] 上一题", controls.previous_enabled),
        Span::raw("        "),
        button("[l] 下一题 ▶", controls.next_enabled),
    ]);
    let widget = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.phase {
        Phase::Quiz => "[1-4] 选择  [h/←] 上一题  [l/→/Enter] 下一题  [q] 退出",
        Phase::Completed => "[Enter] 确认",
        _ => "[q] 退出",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn render_completed_dialog(frame: &mut Frame) {
    let area = centered_rect(40, 20, frame.area());
    let inner = render_dialog_framework(frame, area, "🎉 完成", Color::Green);
    frame.render_widget(
        Paragraph::new("答题完成！\n\n[Enter] 确认").alignment(Alignment::Center),
        inner,
    );
}

fn render_summary(frame: &mut Frame, summary: &Summary) {
    let area = centered_rect(50, 40, frame.area());
    let inner = render_dialog_framework(frame, area, "成绩", Color::Cyan);

    let seconds = summary.elapsed.num_seconds().max(0);
    let lines = vec![
        Line::from(Span::styled(
            format!(
                "答对 {}/{} ({}%)",
                summary.correct,
                summary.total,
                summary.percent()
            ),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("已作答 {}", summary.answered)),
        Line::from(format!("用时 {:02}:{:02}", seconds / 60, seconds % 60)),
        Line::from(""),
        Line::from(Span::styled(
            "[r] 再来一局  [q] 退出",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
