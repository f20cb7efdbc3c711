//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use crate::quiz::QuizSession;
use crate::storage::LedgerStore;

/// 应用阶段
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// 正在获取题目
    Loading,
    /// 获取失败，附带错误信息
    Failed(String),
    Quiz,
    /// 末题答完，等待用户确认
    Completed,
    /// 成绩页
    Summary,
}

/// dispatch 之后运行时需要做的事
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
    /// 重新获取题目
    Fetch,
}

/// 应用状态
pub struct App {
    pub phase: Phase,
    pub session: Option<QuizSession>,
    pub store: Option<LedgerStore>,
    pub amount: u8,
    pub message: Option<String>,
}

impl App {
    /// 创建新的应用实例，初始为加载状态
    pub fn new(amount: u8, store: Option<LedgerStore>) -> Self {
        Self {
            phase: Phase::Loading,
            session: None,
            store,
            amount,
            message: None,
        }
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }
}
