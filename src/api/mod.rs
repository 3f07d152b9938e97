// ==========================================
// 红树林景区售票收银系统 - API层
// ==========================================
// 职责: 面向收银员界面的业务接口
// - CatalogApi: 票种目录管理
// - CashierApi: 收银台 (购物车/结账/小票)
// - HistoryApi: 交易历史与补打
// ==========================================

pub mod cashier_api;
pub mod catalog_api;
pub mod error;
pub mod history_api;

pub use cashier_api::{CartLineView, CartSummary, CashierApi, CheckoutResponse};
pub use catalog_api::CatalogApi;
pub use error::{ApiError, ApiResult};
pub use history_api::HistoryApi;
