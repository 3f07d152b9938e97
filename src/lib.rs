// ==========================================
// 红树林景区售票收银系统 - 核心库
// ==========================================
// 技术栈: Tauri + Rust + SQLite
// 系统定位: 线下售票终端 (单收银员会话)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 收银层 - 购物车/结账防重/小票
pub mod cashier;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - Tauri 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CheckoutPhase, DeleteOutcome, PaymentMethod};

// 领域实体
pub use domain::{NewTransaction, TicketType, TransactionView};

// 收银核心
pub use cashier::{
    Cart, CartLine, CheckoutGuard, CheckoutOutcome, CheckoutRequest, CheckoutResult,
    TransactionWriter,
};

// API
pub use api::{CashierApi, CatalogApi, HistoryApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "红树林景区售票收银系统";
