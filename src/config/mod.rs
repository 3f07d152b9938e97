// ==========================================
// 红树林景区售票收银系统 - 配置层
// ==========================================

pub mod config_manager;

pub use config_manager::{ConfigItem, ConfigManager, SiteProfile};
