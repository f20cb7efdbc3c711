//! 答题核心
//!
//! 与终端无关的纯状态：题库与游标、答题账本、选项洗牌、导航控制。

pub mod ledger;
pub mod session;
pub mod shuffle;
pub mod store;

use thiserror::Error;

pub use ledger::{AnswerLedger, Recorded};
pub use session::{Mark, NextOutcome, QuizSession, Summary};

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("question set is empty")]
    Empty,
    #[error("ledger references question {index} but only {len} questions exist")]
    LedgerOutOfRange { index: usize, len: usize },
}
