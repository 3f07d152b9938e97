// ==========================================
// 红树林景区售票收银系统 - 领域类型定义
// ==========================================
// 金额语义: 全部为整数印尼盾 (Rp)，禁止浮点
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 支付方式 (Payment Method)
// ==========================================
// 序列化格式: 小写 (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Tunai,    // 现金 (线下窗口默认)
    Transfer, // 转账
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Tunai
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Tunai => write!(f, "tunai"),
            PaymentMethod::Transfer => write!(f, "transfer"),
        }
    }
}

impl PaymentMethod {
    /// 从数据库字符串解析支付方式
    pub fn from_db_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "transfer" => PaymentMethod::Transfer,
            _ => PaymentMethod::Tunai, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PaymentMethod::Tunai => "tunai",
            PaymentMethod::Transfer => "transfer",
        }
    }
}

// ==========================================
// 结账阶段 (Checkout Phase)
// ==========================================
// 防重复提交状态机:
//   Idle -> InFlight -> Completed -> Idle
//   持久化失败: InFlight -> Idle (立即解锁，允许重试)
// 关键约束: Completed 后必须由收银员显式确认(关闭小票)才回到 Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutPhase {
    Idle,      // 空闲，接受结账
    InFlight,  // 持久化进行中，拒绝一切结账请求
    Completed, // 已完成，等待收银员确认
}

impl fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutPhase::Idle => write!(f, "IDLE"),
            CheckoutPhase::InFlight => write!(f, "IN_FLIGHT"),
            CheckoutPhase::Completed => write!(f, "COMPLETED"),
        }
    }
}

// ==========================================
// 票种删除结果 (Delete Outcome)
// ==========================================
// 业务策略: 已有售出记录的票种不允许物理删除，
// 外键冲突时回退为停用(归档)，保护财务数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeleteOutcome {
    Deleted,     // 物理删除成功
    Deactivated, // 存在引用，回退为停用
}

impl fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteOutcome::Deleted => write!(f, "DELETED"),
            DeleteOutcome::Deactivated => write!(f, "DEACTIVATED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_db_roundtrip() {
        assert_eq!(PaymentMethod::from_db_str("tunai"), PaymentMethod::Tunai);
        assert_eq!(
            PaymentMethod::from_db_str("TRANSFER"),
            PaymentMethod::Transfer
        );
        // 未知值回退为现金
        assert_eq!(PaymentMethod::from_db_str("qris"), PaymentMethod::Tunai);
        assert_eq!(PaymentMethod::Transfer.to_db_str(), "transfer");
    }

    #[test]
    fn test_checkout_phase_display() {
        assert_eq!(CheckoutPhase::InFlight.to_string(), "IN_FLIGHT");
    }
}
