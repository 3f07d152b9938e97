// ==========================================
// 红树林景区售票收银系统 - 收银层
// ==========================================
// 职责: 购物车、结账防重状态机、小票渲染
// 这是本系统唯一带正确性不变量的核心:
// 同一购物车快照不允许重复扣款
// ==========================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod receipt;

pub use cart::{Cart, CartLine};
pub use checkout::{
    CheckoutGuard, CheckoutOutcome, CheckoutRequest, CheckoutResult, TransactionWriter,
};
pub use error::{CashierError, CashierResult};
pub use receipt::{format_rupiah, render_batch_receipt, render_receipt, RECEIPT_WIDTH};
