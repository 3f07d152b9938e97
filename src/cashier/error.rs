// ==========================================
// 红树林景区售票收银系统 - 收银层错误类型
// ==========================================
// 错误分类:
// - Validation: 输入不合法，本地可恢复，不会锁定结账状态机
// - Persistence: 持久化写入失败，状态机立即解锁以便重试
// - 重复提交不是错误: 以 CheckoutOutcome::Rejected 静默返回
// ==========================================

use thiserror::Error;

/// 收银层错误类型
#[derive(Error, Debug)]
pub enum CashierError {
    #[error("输入校验失败: {0}")]
    Validation(String),

    #[error("持久化写入失败: {0}")]
    Persistence(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// Result 类型别名
pub type CashierResult<T> = Result<T, CashierError>;
