// ==========================================
// 红树林景区售票收银系统 - 购物车
// ==========================================
// 职责: 记录本次结账前选中的票种与数量
// 生命周期: 单收银员会话，纯内存，不持久化
// 约束: 每个票种至多一行 (数量累加)，行序为加入顺序
// ==========================================

use crate::cashier::error::{CashierError, CashierResult};
use crate::domain::TicketType;
use serde::{Deserialize, Serialize};

// ==========================================
// CartLine - 购物车行
// ==========================================
// 不变量: quantity >= 1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub ticket: TicketType, // 票种快照
    pub quantity: i64,      // 数量
}

impl CartLine {
    /// 行小计
    pub fn line_total(&self) -> i64 {
        self.ticket.price * self.quantity
    }
}

// ==========================================
// Cart - 购物车
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// 加入票种: 已存在则数量 +1，否则新增一行 (数量 1)
    ///
    /// 停售票种拒绝加入 (Validation)
    pub fn add_ticket(&mut self, ticket: &TicketType) -> CashierResult<()> {
        if !ticket.active {
            return Err(CashierError::Validation(format!(
                "票种已停售: {}",
                ticket.name
            )));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.ticket.id == ticket.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                ticket: ticket.clone(),
                quantity: 1,
            });
        }
        Ok(())
    }

    /// 调整数量: 下限为 1 (减到 0 需用显式移除)
    ///
    /// 未知票种ID为 no-op; delta 来自前端，饱和加法避免溢出
    pub fn adjust_quantity(&mut self, ticket_id: i64, delta: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.ticket.id == ticket_id) {
            line.quantity = line.quantity.saturating_add(delta).max(1);
        }
    }

    /// 移除整行
    pub fn remove_ticket(&mut self, ticket_id: i64) {
        self.lines.retain(|l| l.ticket.id != ticket_id);
    }

    /// 清空购物车 (结账成功后由调用方触发)
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// 应收总额，纯函数
    pub fn total(&self) -> i64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// 深拷贝快照，用于构造结账请求
    ///
    /// 结账后继续修改购物车不会影响已生成的快照
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines.clone()
    }
}
