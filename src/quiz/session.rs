//! 答题会话（导航控制）
//!
//! 持有题库、账本和当前显示的选项顺序。"是否已作答"始终由账本推导，
//! 回到已答题时仍显示原有标记且"下一题"可用。

use std::collections::BTreeMap;

use chrono::{DateTime, Local, TimeDelta};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::models::{OptionId, Question};

use super::ledger::{AnswerLedger, Recorded};
use super::shuffle::shuffled_options;
use super::store::QuestionStore;
use super::QuizError;

/// "下一题"的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    Moved,
    /// 末题已作答，首次按下一题时触发
    Completed,
    Blocked,
}

/// 上一题/下一题按钮的可用状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

/// 选项的正误标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    None,
    Correct,
    Incorrect,
}

/// 完成后的成绩
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub answered: usize,
    pub correct: usize,
    pub total: usize,
    pub elapsed: TimeDelta,
}

impl Summary {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct * 100 / self.total) as u32
    }
}

pub struct QuizSession {
    store: QuestionStore,
    ledger: AnswerLedger,
    /// 本次会话内选中的选项；从磁盘恢复的记录只有文本
    selections: BTreeMap<usize, OptionId>,
    order: Vec<OptionId>,
    rng: StdRng,
    started_at: DateTime<Local>,
    completed: bool,
}

impl QuizSession {
    /// 新会话，账本为空
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        Self::with_rng(questions, AnswerLedger::new(), StdRng::from_rng(&mut rand::rng()))
    }

    /// 从已保存的账本恢复，游标停在第一道未答题
    pub fn resume(questions: Vec<Question>, ledger: AnswerLedger) -> Result<Self, QuizError> {
        Self::with_rng(questions, ledger, StdRng::from_rng(&mut rand::rng()))
    }

    pub fn with_rng(
        questions: Vec<Question>,
        ledger: AnswerLedger,
        rng: StdRng,
    ) -> Result<Self, QuizError> {
        let store = QuestionStore::new(questions)?;
        if let Some(index) = ledger.max_index()
            && index >= store.len()
        {
            return Err(QuizError::LedgerOutOfRange {
                index,
                len: store.len(),
            });
        }

        let mut session = Self {
            store,
            ledger,
            selections: BTreeMap::new(),
            order: Vec::new(),
            rng,
            started_at: Local::now(),
            completed: false,
        };
        while session.ledger.contains(session.store.cursor()) && session.store.advance() {}
        session.reshuffle();
        Ok(session)
    }

    fn reshuffle(&mut self) {
        self.order = shuffled_options(self.store.current(), &mut self.rng);
    }

    pub fn current(&self) -> &Question {
        self.store.current()
    }

    pub fn cursor(&self) -> usize {
        self.store.cursor()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn questions(&self) -> &[Question] {
        self.store.questions()
    }

    pub fn ledger(&self) -> &AnswerLedger {
        &self.ledger
    }

    /// 当前显示顺序下的选项
    pub fn options(&self) -> &[OptionId] {
        &self.order
    }

    pub fn has_answered(&self) -> bool {
        self.ledger.contains(self.store.cursor())
    }

    /// 选择第 slot 个显示位置上的选项
    pub fn select(&mut self, slot: usize) -> Recorded {
        let Some(&option) = self.order.get(slot) else {
            return Recorded::InvalidOption;
        };
        let index = self.store.cursor();
        let recorded = self.ledger.record(index, self.store.current(), option);
        if let Recorded::New { .. } = recorded {
            self.selections.insert(index, option);
        }
        recorded
    }

    pub fn previous(&mut self) -> bool {
        if !self.store.retreat() {
            return false;
        }
        self.reshuffle();
        true
    }

    pub fn next(&mut self) -> NextOutcome {
        if !self.has_answered() {
            return NextOutcome::Blocked;
        }
        if self.store.advance() {
            self.reshuffle();
            return NextOutcome::Moved;
        }
        if self.completed {
            return NextOutcome::Blocked;
        }
        self.completed = true;
        NextOutcome::Completed
    }

    pub fn controls(&self) -> Controls {
        Controls {
            previous_enabled: !self.store.is_first(),
            next_enabled: self.has_answered(),
        }
    }

    /// 当前题某个选项的标记
    pub fn overlay(&self, option: OptionId) -> Mark {
        let Some(record) = self.ledger.get(self.store.cursor()) else {
            return Mark::None;
        };
        let question = self.store.current();
        let Some(text) = question.option_text(option) else {
            return Mark::None;
        };

        let selected = match self.selections.get(&self.store.cursor()) {
            Some(&id) => id == option,
            None => text == record.selected_option,
        };
        if selected {
            if record.is_correct {
                Mark::Correct
            } else {
                Mark::Incorrect
            }
        } else if question.is_correct(text) {
            Mark::Correct
        } else {
            Mark::None
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            answered: self.ledger.len(),
            correct: self.ledger.score(),
            total: self.store.len(),
            elapsed: Local::now() - self.started_at,
        }
    }
}
