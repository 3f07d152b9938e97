// ==========================================
// 红树林景区售票收银系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::api::{CashierApi, CatalogApi, HistoryApi};
use crate::config::ConfigManager;
use crate::db::configure_sqlite_connection;
use crate::repository::{TicketTypeRepository, TransactionRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源
/// 在Tauri应用中作为全局状态管理
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 票种目录API
    pub catalog_api: Arc<CatalogApi>,

    /// 收银台API
    pub cashier_api: Arc<CashierApi>,

    /// 交易历史API
    pub history_api: Arc<HistoryApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 说明
    /// 所有仓储共享同一个 SQLite 连接 (外键约束跨表生效)。
    /// ticket_type 表先建: ticket_transaction 的外键引用它
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let conn = Connection::open(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        configure_sqlite_connection(&conn).map_err(|e| format!("数据库初始化失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层 (建表顺序即外键依赖顺序)
        // ==========================================

        let ticket_type_repo = Arc::new(
            TicketTypeRepository::from_connection(conn.clone())
                .map_err(|e| format!("无法创建TicketTypeRepository: {}", e))?,
        );
        let transaction_repo = Arc::new(
            TransactionRepository::from_connection(conn.clone())
                .map_err(|e| format!("无法创建TransactionRepository: {}", e))?,
        );

        // 配置管理器
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 初始化API层
        // ==========================================

        let catalog_api = Arc::new(CatalogApi::new(ticket_type_repo.clone()));

        let cashier_api = Arc::new(CashierApi::new(
            ticket_type_repo,
            transaction_repo.clone(),
            config_manager.clone(),
        ));

        let history_api = Arc::new(HistoryApi::new(transaction_repo, config_manager.clone()));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            catalog_api,
            cashier_api,
            history_api,
            config_manager,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 开发环境: 用户数据目录/mangrove-pos-dev/mangrove_pos.db
/// - 生产环境: 用户数据目录/mangrove-pos/mangrove_pos.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("MANGROVE_POS_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 使用用户数据目录，避免开发期 DB 文件变化触发 `tauri dev` 的文件监控重启
    let mut path = PathBuf::from("./mangrove_pos.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("mangrove-pos-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("mangrove-pos");
        }

        std::fs::create_dir_all(&path).ok();
        path = path.join("mangrove_pos.db");
    }

    path.to_string_lossy().to_string()
}
