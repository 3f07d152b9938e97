// ==========================================
// 红树林景区售票收银系统 - 票种领域模型
// ==========================================
// 对应表: ticket_type
// 票种由管理流程维护，收银核心只读
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// TicketType - 票种
// ==========================================
// 不变量: price >= 0 (整数印尼盾)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketType {
    pub id: i64,                    // 票种ID
    pub name: String,               // 票种名称 (如 "Tiket Dewasa")
    pub price: i64,                 // 单价 (整数印尼盾)
    pub active: bool,               // 是否在售
    pub created_at: NaiveDateTime,  // 创建时间
    pub updated_at: NaiveDateTime,  // 更新时间
}

impl TicketType {
    /// 判断是否可加入购物车
    pub fn is_sellable(&self) -> bool {
        self.active && self.price >= 0
    }
}
