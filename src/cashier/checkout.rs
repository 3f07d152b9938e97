// ==========================================
// 红树林景区售票收银系统 - 结账防重状态机
// ==========================================
// 本系统唯一的正确性关键契约:
// - 同一购物车快照至多提交一次 (回车双击/按键连发均被拦截)
// - Completed 后保持锁定，直到收银员显式确认(关闭小票)
// - 持久化失败必须确定性解锁，收银员永远不会卡死在 InFlight
// 实现要点: 阶段检查与 Idle->InFlight 切换在同一次加锁内完成，
// 两个近乎同时的调用不可能都观察到 Idle
// ==========================================

use crate::cashier::cart::CartLine;
use crate::cashier::error::{CashierError, CashierResult};
use crate::domain::types::{CheckoutPhase, PaymentMethod};
use crate::domain::NewTransaction;
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

// ==========================================
// 持久化协作者接口
// ==========================================

/// 交易批量写入接口
///
/// 实现方必须保证整批原子写入: 要么全部行落库，要么一行都不留
pub trait TransactionWriter: Send + Sync {
    fn write_batch(&self, rows: &[NewTransaction]) -> Result<Vec<i64>, String>;
}

// ==========================================
// 结账请求/结果
// ==========================================

/// 结账请求 (临时对象，不持久化)
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub buyer_name: String,            // 购票人 (必填)
    pub group_name: Option<String>,    // 团体名称 (可空，落库为 "-")
    pub lines: Vec<CartLine>,          // 购物车快照
    pub amount_tendered: i64,          // 实收金额 (整数印尼盾)
    pub payment_method: PaymentMethod, // 支付方式
    pub visit_date: NaiveDate,         // 游览日期
}

impl CheckoutRequest {
    /// 应收总额 (溢出返回 None)
    pub fn total_due(&self) -> Option<i64> {
        self.lines.iter().try_fold(0i64, |acc, line| {
            line.ticket
                .price
                .checked_mul(line.quantity)
                .and_then(|sub| acc.checked_add(sub))
        })
    }

    /// 规范化团体名称: 空白时记为 "-"
    fn normalized_group_name(&self) -> String {
        self.group_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("-")
            .to_string()
    }
}

/// 结账结果快照 (成功后恰好生成一次，此后不可变)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResult {
    pub transaction_ids: Vec<i64>,     // 分配的交易行ID
    pub batch_id: String,              // 批次号 (UUID)
    pub total_due: i64,                // 应收
    pub amount_tendered: i64,          // 实收
    pub change_due: i64,               // 找零 (>= 0)
    pub lines: Vec<CartLine>,          // 购物车快照
    pub buyer_name: String,            // 购票人
    pub group_name: String,            // 团体名称 (规范化后)
    pub payment_method: PaymentMethod, // 支付方式
    pub visit_date: NaiveDate,         // 游览日期
    pub timestamp: NaiveDateTime,      // 交易时间
}

/// 结账调用结果
///
/// Rejected 表示状态机非 Idle 时的重复提交，按设计静默忽略，
/// 不作为错误上报
#[derive(Debug)]
pub enum CheckoutOutcome {
    Completed(CheckoutResult),
    Rejected,
}

// ==========================================
// CheckoutGuard - 结账防重状态机
// ==========================================

pub struct CheckoutGuard {
    phase: Mutex<CheckoutPhase>,
}

impl Default for CheckoutGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutGuard {
    pub fn new() -> Self {
        Self {
            phase: Mutex::new(CheckoutPhase::Idle),
        }
    }

    // 锁中毒时取回内部状态: 失败路径必须仍能驱动状态机解锁
    fn lock_phase(&self) -> std::sync::MutexGuard<'_, CheckoutPhase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 当前阶段
    pub fn phase(&self) -> CheckoutPhase {
        *self.lock_phase()
    }

    /// 输入校验 (失败不改变状态机阶段)
    fn validate(request: &CheckoutRequest) -> CashierResult<i64> {
        if request.lines.is_empty() {
            return Err(CashierError::Validation("购物车为空".to_string()));
        }
        if request.buyer_name.trim().is_empty() {
            return Err(CashierError::Validation("购票人不能为空".to_string()));
        }
        for line in &request.lines {
            if line.quantity < 1 {
                return Err(CashierError::Validation(format!(
                    "票种数量不合法: {} x{}",
                    line.ticket.name, line.quantity
                )));
            }
            if line.ticket.price < 0 {
                return Err(CashierError::Validation(format!(
                    "票种单价不合法: {}",
                    line.ticket.name
                )));
            }
        }

        let total_due = request
            .total_due()
            .ok_or_else(|| CashierError::Validation("金额溢出".to_string()))?;
        if request.amount_tendered < total_due {
            return Err(CashierError::Validation(format!(
                "实收金额不足: 应收 {} 实收 {}",
                total_due, request.amount_tendered
            )));
        }
        Ok(total_due)
    }

    /// 提交结账
    ///
    /// # 返回
    /// - Ok(CheckoutOutcome::Completed): 整批落库成功，状态机进入 Completed
    /// - Ok(CheckoutOutcome::Rejected): 状态机非 Idle，重复提交被拦截 (无副作用)
    /// - Err(Validation): 输入不合法，状态机保持 Idle
    /// - Err(Persistence): 写入失败且已回滚，状态机回到 Idle
    pub fn checkout(
        &self,
        request: &CheckoutRequest,
        writer: &dyn TransactionWriter,
    ) -> CashierResult<CheckoutOutcome> {
        // 阶段检查 + 校验 + 占锁在同一次加锁内完成
        let total_due = {
            let mut phase = self.lock_phase();
            if *phase != CheckoutPhase::Idle {
                tracing::debug!("重复提交被拦截: phase={}", *phase);
                return Ok(CheckoutOutcome::Rejected);
            }
            let total_due = Self::validate(request)?;
            *phase = CheckoutPhase::InFlight;
            total_due
        };

        let change_due = request.amount_tendered - total_due;
        let batch_id = Uuid::new_v4().to_string();
        let timestamp = Local::now().naive_local();
        let group_name = request.normalized_group_name();

        let rows: Vec<NewTransaction> = request
            .lines
            .iter()
            .map(|line| NewTransaction {
                batch_id: batch_id.clone(),
                buyer_name: request.buyer_name.trim().to_string(),
                group_name: group_name.clone(),
                ticket_type_id: line.ticket.id,
                quantity: line.quantity,
                line_total: line.line_total(),
                payment_method: request.payment_method,
                visit_date: request.visit_date,
                created_at: timestamp,
            })
            .collect();

        // 持久化期间不持有阶段锁: 并发的重复调用立即看到 InFlight 而被拒绝
        match writer.write_batch(&rows) {
            Ok(transaction_ids) => {
                *self.lock_phase() = CheckoutPhase::Completed;
                tracing::info!(
                    "结账成功: batch_id={}, rows={}, total={}, change={}",
                    batch_id,
                    transaction_ids.len(),
                    total_due,
                    change_due
                );
                Ok(CheckoutOutcome::Completed(CheckoutResult {
                    transaction_ids,
                    batch_id,
                    total_due,
                    amount_tendered: request.amount_tendered,
                    change_due,
                    lines: request.lines.clone(),
                    buyer_name: request.buyer_name.trim().to_string(),
                    group_name,
                    payment_method: request.payment_method,
                    visit_date: request.visit_date,
                    timestamp,
                }))
            }
            Err(msg) => {
                // 失败立即解锁，收银员可直接重试
                *self.lock_phase() = CheckoutPhase::Idle;
                tracing::warn!("结账持久化失败，已解锁: {}", msg);
                Err(CashierError::Persistence(msg))
            }
        }
    }

    /// 收银员确认 (关闭小票)
    ///
    /// 仅 Completed -> Idle 有效; 其余阶段为 no-op，
    /// 便于界面无条件调用关闭逻辑
    pub fn acknowledge(&self) {
        let mut phase = self.lock_phase();
        if *phase == CheckoutPhase::Completed {
            *phase = CheckoutPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TicketType;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==========================================
    // 测试辅助
    // ==========================================

    struct MockWriter {
        calls: AtomicUsize,
        fail: bool,
    }

    impl MockWriter {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TransactionWriter for MockWriter {
        fn write_batch(&self, rows: &[NewTransaction]) -> Result<Vec<i64>, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err("database is locked".to_string());
            }
            Ok((1..=rows.len() as i64).collect())
        }
    }

    fn ticket(id: i64, name: &str, price: i64) -> TicketType {
        let ts = chrono::NaiveDate::from_ymd_opt(2026, 8, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        TicketType {
            id,
            name: name.to_string(),
            price,
            active: true,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn sample_request(tendered: i64) -> CheckoutRequest {
        // 例: 成人票 15000 x2 + 儿童票 10000 x1 = 40000
        CheckoutRequest {
            buyer_name: "Budi".to_string(),
            group_name: None,
            lines: vec![
                CartLine {
                    ticket: ticket(1, "Tiket Dewasa", 15000),
                    quantity: 2,
                },
                CartLine {
                    ticket: ticket(2, "Tiket Anak", 10000),
                    quantity: 1,
                },
            ],
            amount_tendered: tendered,
            payment_method: PaymentMethod::Tunai,
            visit_date: chrono::NaiveDate::from_ymd_opt(2026, 8, 23).unwrap(),
        }
    }

    // ==========================================
    // 正常流程
    // ==========================================

    #[test]
    fn test_checkout_success_computes_change() {
        let guard = CheckoutGuard::new();
        let writer = MockWriter::ok();

        let outcome = guard.checkout(&sample_request(50000), &writer).unwrap();
        match outcome {
            CheckoutOutcome::Completed(result) => {
                assert_eq!(result.total_due, 40000);
                assert_eq!(result.change_due, 10000);
                assert_eq!(result.transaction_ids.len(), 2);
                assert_eq!(result.group_name, "-");
            }
            CheckoutOutcome::Rejected => panic!("首次提交不应被拒绝"),
        }

        // 成功后保持锁定，等待确认
        assert_eq!(guard.phase(), CheckoutPhase::Completed);
        assert_eq!(writer.call_count(), 1);
    }

    #[test]
    fn test_duplicate_checkout_rejected_until_acknowledge() {
        let guard = CheckoutGuard::new();
        let writer = MockWriter::ok();
        let request = sample_request(50000);

        let first = guard.checkout(&request, &writer).unwrap();
        assert!(matches!(first, CheckoutOutcome::Completed(_)));

        // 第二次提交: 静默拒绝，不触达持久化
        let second = guard.checkout(&request, &writer).unwrap();
        assert!(matches!(second, CheckoutOutcome::Rejected));
        assert_eq!(writer.call_count(), 1);

        // 确认后重新接受结账
        guard.acknowledge();
        assert_eq!(guard.phase(), CheckoutPhase::Idle);
        let third = guard.checkout(&request, &writer).unwrap();
        assert!(matches!(third, CheckoutOutcome::Completed(_)));
        assert_eq!(writer.call_count(), 2);
    }

    // ==========================================
    // 校验失败
    // ==========================================

    #[test]
    fn test_insufficient_tender_fails_and_stays_idle() {
        let guard = CheckoutGuard::new();
        let writer = MockWriter::ok();

        // 应收 40000，实收 30000
        let result = guard.checkout(&sample_request(30000), &writer);
        assert!(matches!(result, Err(CashierError::Validation(_))));

        // 校验失败不锁定状态机，不触达持久化
        assert_eq!(guard.phase(), CheckoutPhase::Idle);
        assert_eq!(writer.call_count(), 0);
    }

    #[test]
    fn test_empty_cart_and_blank_buyer_rejected() {
        let guard = CheckoutGuard::new();
        let writer = MockWriter::ok();

        let mut request = sample_request(50000);
        request.lines.clear();
        assert!(matches!(
            guard.checkout(&request, &writer),
            Err(CashierError::Validation(_))
        ));

        let mut request = sample_request(50000);
        request.buyer_name = "   ".to_string();
        assert!(matches!(
            guard.checkout(&request, &writer),
            Err(CashierError::Validation(_))
        ));

        assert_eq!(guard.phase(), CheckoutPhase::Idle);
    }

    #[test]
    fn test_exact_tender_is_accepted() {
        let guard = CheckoutGuard::new();
        let writer = MockWriter::ok();

        let outcome = guard.checkout(&sample_request(40000), &writer).unwrap();
        match outcome {
            CheckoutOutcome::Completed(result) => assert_eq!(result.change_due, 0),
            CheckoutOutcome::Rejected => panic!("刚好付清应该被接受"),
        }
    }

    // ==========================================
    // 持久化失败
    // ==========================================

    #[test]
    fn test_persistence_failure_unlocks_guard() {
        let guard = CheckoutGuard::new();
        let failing = MockWriter::failing();

        let result = guard.checkout(&sample_request(50000), &failing);
        assert!(matches!(result, Err(CashierError::Persistence(_))));

        // 失败后立即解锁，重试可被接受
        assert_eq!(guard.phase(), CheckoutPhase::Idle);
        let writer = MockWriter::ok();
        let retry = guard.checkout(&sample_request(50000), &writer).unwrap();
        assert!(matches!(retry, CheckoutOutcome::Completed(_)));
    }

    // ==========================================
    // acknowledge 边界
    // ==========================================

    #[test]
    fn test_acknowledge_is_noop_outside_completed() {
        let guard = CheckoutGuard::new();

        // Idle 下确认: no-op
        guard.acknowledge();
        assert_eq!(guard.phase(), CheckoutPhase::Idle);
    }

    #[test]
    fn test_group_name_normalization() {
        let guard = CheckoutGuard::new();
        let writer = MockWriter::ok();

        let mut request = sample_request(50000);
        request.group_name = Some("  ".to_string());
        match guard.checkout(&request, &writer).unwrap() {
            CheckoutOutcome::Completed(result) => assert_eq!(result.group_name, "-"),
            CheckoutOutcome::Rejected => panic!("不应被拒绝"),
        }

        guard.acknowledge();
        let mut request = sample_request(50000);
        request.group_name = Some("SDN 1 Pesisir".to_string());
        match guard.checkout(&request, &writer).unwrap() {
            CheckoutOutcome::Completed(result) => {
                assert_eq!(result.group_name, "SDN 1 Pesisir")
            }
            CheckoutOutcome::Rejected => panic!("不应被拒绝"),
        }
    }
}
