//! 异步运行时
//!
//! 用 tokio::select! 同时等待终端事件和题目获取结果。获取在独立任务中进行，
//! 期间仍可响应按键。每次状态变化后都会先重绘再处理下一个事件。

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::fetch::{FetchError, TriviaClient};
use crate::models::Question;
use crate::ui::{self, App, Control, Phase};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

type FetchResult = Result<Vec<Question>, FetchError>;

pub struct Runtime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    app: App,
    client: TriviaClient,
    fetch_tx: mpsc::Sender<FetchResult>,
    fetch_rx: mpsc::Receiver<FetchResult>,
}

impl Runtime {
    pub fn new(app: App, client: TriviaClient) -> Result<Self, RuntimeError> {
        enable_raw_mode()?;
        let terminal = restore_on_error(
            || {
                stdout().execute(EnterAlternateScreen)?;
                Terminal::new(CrosstermBackend::new(stdout()))
            },
            restore_terminal,
        )?;
        let (fetch_tx, fetch_rx) = mpsc::channel(1);

        Ok(Self {
            terminal,
            app,
            client,
            fetch_tx,
            fetch_rx,
        })
    }

    /// 主循环
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        if self.app.phase == Phase::Loading {
            self.spawn_fetch();
        }

        let mut event_stream = EventStream::new();

        loop {
            self.terminal.draw(|frame| ui::render(frame, &self.app))?;

            let control = tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            ui::handle_key_event(&mut self.app, key.code)
                        }
                        Some(Ok(_)) => Control::Continue,
                        Some(Err(e)) => return Err(RuntimeError::Io(e)),
                        None => Control::Quit,
                    }
                }

                Some(result) = self.fetch_rx.recv() => {
                    self.app.on_questions_loaded(result);
                    Control::Continue
                }
            };

            match control {
                Control::Continue => {}
                Control::Fetch => self.spawn_fetch(),
                Control::Quit => break,
            }
        }

        tracing::info!("quitting");
        Ok(())
    }

    fn spawn_fetch(&self) {
        let client = self.client.clone();
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch().await;
            if tx.send(result).await.is_err() {
                tracing::debug!("runtime gone before fetch finished");
            }
        });
    }
}

/// 初始化失败时先恢复终端再返回错误，此时还没有 Runtime 可供 Drop
fn restore_on_error<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> io::Result<T> {
    setup().inspect_err(|_| restore())
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
}

impl Drop for Runtime {
    fn drop(&mut self) {
        restore_terminal();
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_failed_setup_restores_terminal() {
        let restored = Cell::new(false);
        let result: io::Result<()> = restore_on_error(
            || Err(io::Error::other("no tty")),
            || restored.set(true),
        );
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_successful_setup_leaves_terminal_alone() {
        let restored = Cell::new(false);
        let result = restore_on_error(|| Ok(7), || restored.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!restored.get());
    }
}
