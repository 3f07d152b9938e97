// ==========================================
// 红树林景区售票收银系统 - 领域层
// ==========================================

pub mod ticket;
pub mod transaction;
pub mod types;

pub use ticket::TicketType;
pub use transaction::{NewTransaction, TransactionView};
pub use types::{CheckoutPhase, DeleteOutcome, PaymentMethod};
