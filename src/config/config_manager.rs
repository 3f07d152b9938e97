// ==========================================
// 红树林景区售票收银系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// SiteProfile - 站点信息
// ==========================================
// 小票票头/票尾来源; 缺省值对应原景区门店
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteProfile {
    pub site_name: String,      // 站点名称 (票头)
    pub site_address: String,   // 站点地址 (票头)
    pub receipt_footer: String, // 票尾文案
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            site_name: "Wisata Mangrove".to_string(),
            site_address: "Jl. Raya Mangrove No. 88".to_string(),
            receipt_footer: "Terima Kasih".to_string(),
        }
    }
}

/// 配置项 (查询/批量更新的 DTO)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigItem {
    /// 作用域ID
    pub scope_id: String,

    /// 配置键
    pub key: String,

    /// 配置值
    pub value: String,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        let manager = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        manager.ensure_tables()?;
        Ok(manager)
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            configure_sqlite_connection(&conn_guard)?;
        }
        let manager = Self { conn };
        manager.ensure_tables()?;
        Ok(manager)
    }

    fn ensure_tables(&self) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS config_kv (
              scope_id TEXT NOT NULL,
              key TEXT NOT NULL,
              value TEXT NOT NULL,
              PRIMARY KEY (scope_id, key)
            );
            "#,
        )?;
        Ok(())
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值 (UPSERT, scope_id='global')
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        if key.trim().is_empty() {
            return Err("配置键不能为空".into());
        }
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    /// 查询所有配置
    pub fn list_configs(&self) -> Result<Vec<ConfigItem>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT scope_id, key, value FROM config_kv ORDER BY scope_id, key")?;
        let configs = stmt
            .query_map([], |row| {
                Ok(ConfigItem {
                    scope_id: row.get(0)?,
                    key: row.get(1)?,
                    value: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(configs)
    }

    /// 读取站点信息 (缺省值兜底，小票渲染永远有票头可用)
    pub fn site_profile(&self) -> SiteProfile {
        let defaults = SiteProfile::default();
        SiteProfile {
            site_name: self
                .get_config_value("site_name")
                .ok()
                .flatten()
                .unwrap_or(defaults.site_name),
            site_address: self
                .get_config_value("site_address")
                .ok()
                .flatten()
                .unwrap_or(defaults.site_address),
            receipt_footer: self
                .get_config_value("receipt_footer")
                .ok()
                .flatten()
                .unwrap_or(defaults.receipt_footer),
        }
    }
}
