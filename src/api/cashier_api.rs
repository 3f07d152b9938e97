// ==========================================
// 红树林景区售票收银系统 - 收银台API
// ==========================================
// 职责: 单收银员会话的完整结账流程
// - 目录浏览 / 购物车维护
// - 结账 (经 CheckoutGuard 防重)
// - 小票展示与确认 (确认即解锁状态机)
// 约束: Completed 阶段禁止修改购物车，
// 界面与后端对"锁定期"的理解保持一致
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::cashier::{
    render_receipt, Cart, CheckoutGuard, CheckoutOutcome, CheckoutRequest, CheckoutResult,
};
use crate::config::ConfigManager;
use crate::domain::types::{CheckoutPhase, PaymentMethod};
use crate::domain::TicketType;
use crate::i18n::t;
use crate::repository::{TicketTypeRepository, TransactionRepository};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// DTO - 界面展示用
// ==========================================

/// 购物车行视图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineView {
    pub ticket_id: i64,
    pub ticket_name: String,
    pub unit_price: i64,
    pub quantity: i64,
    pub line_total: i64,
}

/// 购物车汇总视图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSummary {
    pub lines: Vec<CartLineView>,
    pub total: i64,
}

/// 结账响应
///
/// accepted=false 表示重复提交被静默拦截 (无新交易产生)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub accepted: bool,
    pub message: String,
    pub transaction_ids: Vec<i64>,
    pub batch_id: Option<String>,
    pub total_due: i64,
    pub amount_tendered: i64,
    pub change_due: i64,
    pub receipt: Option<String>,
}

// ==========================================
// CashierApi
// ==========================================

pub struct CashierApi {
    ticket_type_repo: Arc<TicketTypeRepository>,
    transaction_repo: Arc<TransactionRepository>,
    config_manager: Arc<ConfigManager>,
    guard: CheckoutGuard,
    cart: Mutex<Cart>,
    // 最近一次结账结果，确认 (acknowledge) 时清除
    last_result: Mutex<Option<CheckoutResult>>,
}

impl CashierApi {
    pub fn new(
        ticket_type_repo: Arc<TicketTypeRepository>,
        transaction_repo: Arc<TransactionRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            ticket_type_repo,
            transaction_repo,
            config_manager,
            guard: CheckoutGuard::new(),
            cart: Mutex::new(Cart::new()),
            last_result: Mutex::new(None),
        }
    }

    fn lock_cart(&self) -> ApiResult<MutexGuard<'_, Cart>> {
        self.cart
            .lock()
            .map_err(|e| ApiError::InternalError(format!("购物车锁获取失败: {}", e)))
    }

    fn lock_last_result(&self) -> ApiResult<MutexGuard<'_, Option<CheckoutResult>>> {
        self.last_result
            .lock()
            .map_err(|e| ApiError::InternalError(format!("结账结果锁获取失败: {}", e)))
    }

    // Completed 期间购物车冻结，直到收银员关闭小票
    fn ensure_cart_mutable(&self) -> ApiResult<()> {
        let phase = self.guard.phase();
        if phase == CheckoutPhase::Completed {
            return Err(ApiError::BusinessRuleViolation(
                "结账已完成，请先关闭小票再修改购物车".to_string(),
            ));
        }
        Ok(())
    }

    /// 收银端目录: 仅在售票种
    pub fn list_active_tickets(&self) -> ApiResult<Vec<TicketType>> {
        Ok(self.ticket_type_repo.list(true)?)
    }

    /// 当前结账阶段 (界面用于禁用结账按钮)
    pub fn checkout_phase(&self) -> CheckoutPhase {
        self.guard.phase()
    }

    /// 加入票种到购物车 (同票种数量累加)
    pub fn add_to_cart(&self, ticket_id: i64) -> ApiResult<CartSummary> {
        self.ensure_cart_mutable()?;
        let ticket = self
            .ticket_type_repo
            .find_by_id(ticket_id)?
            .ok_or_else(|| ApiError::NotFound(format!("票种(id={})不存在", ticket_id)))?;

        let mut cart = self.lock_cart()?;
        cart.add_ticket(&ticket)?;
        Ok(Self::summarize(&cart))
    }

    /// 调整购物车行数量 (下限 1)
    pub fn adjust_quantity(&self, ticket_id: i64, delta: i64) -> ApiResult<CartSummary> {
        self.ensure_cart_mutable()?;
        let mut cart = self.lock_cart()?;
        cart.adjust_quantity(ticket_id, delta);
        Ok(Self::summarize(&cart))
    }

    /// 移除购物车行
    pub fn remove_from_cart(&self, ticket_id: i64) -> ApiResult<CartSummary> {
        self.ensure_cart_mutable()?;
        let mut cart = self.lock_cart()?;
        cart.remove_ticket(ticket_id);
        Ok(Self::summarize(&cart))
    }

    /// 清空购物车
    pub fn clear_cart(&self) -> ApiResult<CartSummary> {
        self.ensure_cart_mutable()?;
        let mut cart = self.lock_cart()?;
        cart.clear();
        Ok(Self::summarize(&cart))
    }

    /// 购物车汇总
    pub fn cart_summary(&self) -> ApiResult<CartSummary> {
        let cart = self.lock_cart()?;
        Ok(Self::summarize(&cart))
    }

    fn summarize(cart: &Cart) -> CartSummary {
        CartSummary {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    ticket_id: line.ticket.id,
                    ticket_name: line.ticket.name.clone(),
                    unit_price: line.ticket.price,
                    quantity: line.quantity,
                    line_total: line.line_total(),
                })
                .collect(),
            total: cart.total(),
        }
    }

    /// 提交结账
    ///
    /// 防重语义由 CheckoutGuard 保证: 重复提交返回 accepted=false，
    /// 不产生任何交易行。成功后购物车清空、结果暂存供小票展示，
    /// 状态机保持 Completed 直到 acknowledge
    pub fn checkout(
        &self,
        buyer_name: &str,
        group_name: Option<&str>,
        amount_tendered: i64,
        payment_method: PaymentMethod,
    ) -> ApiResult<CheckoutResponse> {
        let request = {
            let cart = self.lock_cart()?;
            CheckoutRequest {
                buyer_name: buyer_name.to_string(),
                group_name: group_name.map(str::to_string),
                lines: cart.snapshot(),
                amount_tendered,
                payment_method,
                visit_date: self.default_visit_date(),
            }
        };

        let outcome = self
            .guard
            .checkout(&request, self.transaction_repo.as_ref())?;

        match outcome {
            CheckoutOutcome::Completed(result) => {
                // 先清空购物车再暂存结果，收银台回到干净状态
                self.lock_cart()?.clear();

                let receipt = render_receipt(&result, &self.config_manager.site_profile());
                let response = CheckoutResponse {
                    accepted: true,
                    message: t("cashier.checkout_completed"),
                    transaction_ids: result.transaction_ids.clone(),
                    batch_id: Some(result.batch_id.clone()),
                    total_due: result.total_due,
                    amount_tendered: result.amount_tendered,
                    change_due: result.change_due,
                    receipt: Some(receipt),
                };
                *self.lock_last_result()? = Some(result);
                Ok(response)
            }
            CheckoutOutcome::Rejected => Ok(CheckoutResponse {
                accepted: false,
                message: t("cashier.duplicate_suppressed"),
                transaction_ids: Vec::new(),
                batch_id: None,
                total_due: 0,
                amount_tendered,
                change_due: 0,
                receipt: None,
            }),
        }
    }

    /// 现售现用: 游览日期默认为当天
    fn default_visit_date(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// 重打当前小票 (幂等，字节级一致)
    pub fn current_receipt(&self) -> ApiResult<Option<String>> {
        let last = self.lock_last_result()?;
        Ok(last
            .as_ref()
            .map(|result| render_receipt(result, &self.config_manager.site_profile())))
    }

    /// 收银员确认 (关闭小票): 解锁状态机并丢弃暂存结果
    ///
    /// 任意阶段调用均安全
    pub fn acknowledge(&self) -> ApiResult<()> {
        self.guard.acknowledge();
        *self.lock_last_result()? = None;
        Ok(())
    }
}
