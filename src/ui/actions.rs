//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// 选择显示位置上的第 n 个选项（从 0 开始）
    Select(usize),
    Previous,
    Next,
    /// 确认完成提示
    Acknowledge,
    /// 重新开始（重新获取题目）
    Restart,
}
