// ==========================================
// 红树林景区售票收银系统 - Tauri 命令（按域拆分）
// ==========================================
// 职责: Tauri 命令定义，连接前端与后端 API
// ==========================================

#![cfg(feature = "tauri-app")]

mod cashier;
mod catalog;
mod common;
mod config;
mod history;

pub use cashier::*;
pub use catalog::*;
pub use config::*;
pub use history::*;
