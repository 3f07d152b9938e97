// ==========================================
// 红树林景区售票收银系统 - 票种仓储
// ==========================================
// 职责:
// - 管理 ticket_type 表 (票种目录)
// - 提供目录查询 (收银端只取在售票种)
// 说明:
// - 物理删除由 API 层在外键冲突时回退为停用
// ==========================================

use crate::db::configure_sqlite_connection;
use crate::domain::TicketType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

pub struct TicketTypeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TicketTypeRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = Connection::open(db_path)?;
        configure_sqlite_connection(&conn)?;
        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.ensure_tables()?;
        Ok(repo)
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_tables()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn ensure_tables(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS ticket_type (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              name TEXT NOT NULL,
              price INTEGER NOT NULL CHECK (price >= 0),
              active INTEGER NOT NULL DEFAULT 1,
              created_at TEXT NOT NULL DEFAULT (datetime('now', 'localtime')),
              updated_at TEXT NOT NULL DEFAULT (datetime('now', 'localtime'))
            );

            CREATE INDEX IF NOT EXISTS idx_ticket_type_active ON ticket_type(active);
            "#,
        )?;
        Ok(())
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<TicketType> {
        Ok(TicketType {
            id: row.get(0)?,
            name: row.get(1)?,
            price: row.get(2)?,
            active: row.get::<_, i64>(3)? != 0,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    /// 新建票种 (默认在售)
    pub fn insert(&self, name: &str, price: i64) -> RepositoryResult<TicketType> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO ticket_type (name, price, active)
            VALUES (?1, ?2, 1)
            "#,
            params![name, price],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        self.find_by_id(id)?.ok_or(RepositoryError::NotFound {
            entity: "TicketType".to_string(),
            id: id.to_string(),
        })
    }

    /// 更新票种名称与单价 (与原管理表单一致，更新时重新上架)
    pub fn update(&self, id: i64, name: &str, price: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE ticket_type
            SET name = ?2, price = ?3, active = 1,
                updated_at = datetime('now', 'localtime')
            WHERE id = ?1
            "#,
            params![id, name, price],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "TicketType".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// 上架/停用票种
    pub fn set_active(&self, id: i64, active: bool) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE ticket_type
            SET active = ?2, updated_at = datetime('now', 'localtime')
            WHERE id = ?1
            "#,
            params![id, if active { 1 } else { 0 }],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "TicketType".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// 物理删除票种
    ///
    /// 已有交易引用时返回 ForeignKeyViolation，
    /// 调用方 (CatalogApi) 负责回退为停用
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM ticket_type WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "TicketType".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<TicketType>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, price, active, created_at, updated_at
            FROM ticket_type
            WHERE id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![id], Self::map_row);
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 查询票种列表 (id 升序，与原管理页一致)
    pub fn list(&self, active_only: bool) -> RepositoryResult<Vec<TicketType>> {
        let conn = self.get_conn()?;
        let mut sql = String::from(
            "SELECT id, name, price, active, created_at, updated_at FROM ticket_type",
        );
        if active_only {
            sql.push_str(" WHERE active = 1");
        }
        sql.push_str(" ORDER BY id ASC");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }
}
