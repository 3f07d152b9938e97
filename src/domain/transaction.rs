// ==========================================
// 红树林景区售票收银系统 - 交易领域模型
// ==========================================
// 对应表: ticket_transaction
// 一次结账 = 一个批次 (batch_id)，每个购物车行写入一条记录
// ==========================================

use crate::domain::types::PaymentMethod;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// NewTransaction - 待写入的交易行
// ==========================================
// 同一批次的所有行共享 batch_id 与 created_at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub batch_id: String,              // 批次号 (UUID)
    pub buyer_name: String,            // 购票人
    pub group_name: String,            // 团体名称 (默认 "-")
    pub ticket_type_id: i64,           // 票种ID
    pub quantity: i64,                 // 数量 (>= 1)
    pub line_total: i64,               // 行小计 (单价 × 数量)
    pub payment_method: PaymentMethod, // 支付方式
    pub visit_date: NaiveDate,         // 游览日期
    pub created_at: NaiveDateTime,     // 交易时间 (批次共享)
}

// ==========================================
// TransactionView - 历史查询视图
// ==========================================
// JOIN ticket_type 后的读模型，供历史页与补打小票使用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionView {
    pub id: i64,                       // 交易行ID
    pub batch_id: String,              // 批次号
    pub buyer_name: String,            // 购票人
    pub group_name: String,            // 团体名称
    pub ticket_type_id: i64,           // 票种ID
    pub ticket_name: String,           // 票种名称快照 (JOIN)
    pub unit_price: i64,               // 票种当前单价 (JOIN)
    pub quantity: i64,                 // 数量
    pub line_total: i64,               // 行小计
    pub payment_method: PaymentMethod, // 支付方式
    pub visit_date: NaiveDate,         // 游览日期
    pub created_at: NaiveDateTime,     // 交易时间
}
