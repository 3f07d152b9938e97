// ==========================================
// 红树林景区售票收银系统 - 仓储层
// ==========================================
// 职责: SQLite 数据访问，屏蔽 SQL 细节
// ==========================================

pub mod error;
pub mod ticket_type_repo;
pub mod transaction_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use ticket_type_repo::TicketTypeRepository;
pub use transaction_repo::TransactionRepository;
