//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法

use super::actions::Action;
use super::state::{App, Control, Phase};
use crate::fetch::FetchError;
use crate::models::Question;
use crate::quiz::{NextOutcome, QuizSession, Recorded};

impl App {
    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> Control {
        match action {
            Action::Quit => return Control::Quit,
            Action::Select(slot) => self.select(slot),
            Action::Previous => self.previous(),
            Action::Next => self.next(),
            Action::Acknowledge => self.acknowledge(),
            Action::Restart => return self.restart(),
        }
        Control::Continue
    }

    // ============ 加载相关 ============

    /// 处理获取结果
    pub fn on_questions_loaded(&mut self, result: Result<Vec<Question>, FetchError>) {
        let questions = match result {
            Ok(questions) => questions,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch questions");
                self.phase = Phase::Failed(e.to_string());
                return;
            }
        };

        match QuizSession::new(questions) {
            Ok(session) => {
                if let Some(store) = &self.store {
                    if let Err(e) = store.clear_ledger() {
                        tracing::warn!(error = %e, "could not clear previous answers");
                    }
                    if let Err(e) = store.save_questions(session.questions()) {
                        tracing::warn!(error = %e, "could not cache question set");
                    }
                }
                self.session = Some(session);
                self.phase = Phase::Quiz;
                self.message = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "unusable question set");
                self.phase = Phase::Failed(e.to_string());
            }
        }
    }

    /// 从本地恢复上次的会话，成功返回 true
    pub fn restore(&mut self) -> bool {
        let Some(store) = &self.store else {
            return false;
        };

        let loaded = store
            .load_questions()
            .and_then(|qs| store.load_ledger().map(|ledger| (qs, ledger)));
        let (questions, ledger) = match loaded {
            Ok((Some(questions), Some(ledger))) => (questions, ledger),
            Ok(_) => {
                tracing::warn!("nothing to resume, starting a new quiz");
                return false;
            }
            Err(e) => {
                tracing::warn!(error = %e, "saved session unreadable, starting a new quiz");
                return false;
            }
        };

        match QuizSession::resume(questions, ledger) {
            Ok(session) => {
                tracing::info!(
                    answered = session.ledger().len(),
                    cursor = session.cursor(),
                    "session resumed"
                );
                self.session = Some(session);
                self.phase = Phase::Quiz;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "saved session inconsistent, starting a new quiz");
                false
            }
        }
    }

    // ============ 答题相关 ============

    /// 选择选项并持久化账本
    pub fn select(&mut self, slot: usize) {
        if self.phase != Phase::Quiz {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.select(slot) {
            Recorded::New { is_correct } => {
                tracing::debug!(index = session.cursor(), slot, is_correct, "answer recorded");
                self.message = None;
                self.persist();
            }
            Recorded::AlreadyAnswered => {
                self.message = Some("本题已作答，以首次选择为准".to_string());
            }
            Recorded::InvalidOption => {}
        }
    }

    fn persist(&mut self) {
        let (Some(store), Some(session)) = (&self.store, &self.session) else {
            return;
        };
        if let Err(e) = store.save_ledger(session.ledger()) {
            tracing::error!(error = %e, "failed to persist answers");
            self.message = Some(format!("保存失败: {e}"));
        }
    }

    // ============ 导航相关 ============

    /// 上一题
    pub fn previous(&mut self) {
        if self.phase != Phase::Quiz {
            return;
        }
        if let Some(session) = self.session.as_mut()
            && session.previous()
        {
            self.message = None;
        }
    }

    /// 下一题，末题时触发完成
    pub fn next(&mut self) {
        if self.phase != Phase::Quiz {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.next() {
            NextOutcome::Moved => self.message = None,
            NextOutcome::Completed => {
                let summary = session.summary();
                tracing::info!(
                    correct = summary.correct,
                    total = summary.total,
                    "quiz completed"
                );
                self.phase = Phase::Completed;
            }
            NextOutcome::Blocked => {
                if !session.has_answered() {
                    self.message = Some("请先作答".to_string());
                }
            }
        }
    }

    /// 确认完成提示，进入成绩页
    pub fn acknowledge(&mut self) {
        if self.phase == Phase::Completed {
            self.phase = Phase::Summary;
        }
    }

    // ============ 通用操作 ============

    /// 重新开始：清空会话并请求新题
    pub fn restart(&mut self) -> Control {
        match self.phase {
            Phase::Summary | Phase::Failed(_) => {
                self.session = None;
                self.phase = Phase::Loading;
                self.message = None;
                Control::Fetch
            }
            _ => Control::Continue,
        }
    }
}
