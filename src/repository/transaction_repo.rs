// ==========================================
// 红树林景区售票收银系统 - 交易仓储
// ==========================================
// 职责:
// - 管理 ticket_transaction 表 (每个购物车行一条记录)
// - 批量写入必须在单个 SQLite 事务内完成:
//   任一行失败则整批回滚，不允许部分提交
// ==========================================

use crate::cashier::TransactionWriter;
use crate::db::configure_sqlite_connection;
use crate::domain::types::PaymentMethod;
use crate::domain::{NewTransaction, TransactionView};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

use crate::repository::error::{RepositoryError, RepositoryResult};

pub struct TransactionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TransactionRepository {
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
            CREATE TABLE IF NOT EXISTS ticket_transaction (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              batch_id TEXT NOT NULL,
              buyer_name TEXT NOT NULL,
              group_name TEXT NOT NULL DEFAULT '-',
              ticket_type_id INTEGER NOT NULL REFERENCES ticket_type(id),
              quantity INTEGER NOT NULL CHECK (quantity >= 1),
              line_total INTEGER NOT NULL CHECK (line_total >= 0),
              payment_method TEXT NOT NULL DEFAULT 'tunai',
              visit_date TEXT NOT NULL,
              created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_ticket_transaction_batch
              ON ticket_transaction(batch_id);
            CREATE INDEX IF NOT EXISTS idx_ticket_transaction_created
              ON ticket_transaction(created_at);
            "#,
        )?;
        Ok(())
    }

    fn map_view_row(row: &Row<'_>) -> SqliteResult<TransactionView> {
        Ok(TransactionView {
            id: row.get(0)?,
            batch_id: row.get(1)?,
            buyer_name: row.get(2)?,
            group_name: row.get(3)?,
            ticket_type_id: row.get(4)?,
            ticket_name: row.get(5)?,
            unit_price: row.get(6)?,
            quantity: row.get(7)?,
            line_total: row.get(8)?,
            payment_method: PaymentMethod::from_db_str(&row.get::<_, String>(9)?),
            visit_date: row.get(10)?,
            created_at: row.get(11)?,
        })
    }

    /// 单事务批量写入交易行，返回分配的行ID (与入参顺序一致)
    ///
    /// 任一行失败时事务回滚，数据库中不会留下该批次的任何行
    pub fn insert_batch(&self, rows: &[NewTransaction]) -> RepositoryResult<Vec<i64>> {
        if rows.is_empty() {
            return Err(RepositoryError::ValidationError(
                "交易批次不能为空".to_string(),
            ));
        }

        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            tx.execute(
                r#"
                INSERT INTO ticket_transaction (
                    batch_id,
                    buyer_name,
                    group_name,
                    ticket_type_id,
                    quantity,
                    line_total,
                    payment_method,
                    visit_date,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    row.batch_id,
                    row.buyer_name,
                    row.group_name,
                    row.ticket_type_id,
                    row.quantity,
                    row.line_total,
                    row.payment_method.to_db_str(),
                    row.visit_date,
                    row.created_at,
                ],
            )?;
            ids.push(tx.last_insert_rowid());
        }
        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(ids)
    }

    /// 查询交易历史 (最新在前)
    ///
    /// # 参数
    /// - search: 按购票人/团体名称做不区分大小写的子串过滤
    pub fn list(&self, search: Option<&str>) -> RepositoryResult<Vec<TransactionView>> {
        let conn = self.get_conn()?;
        let mut sql = String::from(
            r#"
            SELECT
                tt.id,
                tt.batch_id,
                tt.buyer_name,
                tt.group_name,
                tt.ticket_type_id,
                jt.name,
                jt.price,
                tt.quantity,
                tt.line_total,
                tt.payment_method,
                tt.visit_date,
                tt.created_at
            FROM ticket_transaction tt
            JOIN ticket_type jt ON jt.id = tt.ticket_type_id
            "#,
        );

        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s.to_lowercase()));
        if pattern.is_some() {
            sql.push_str(
                " WHERE lower(tt.buyer_name) LIKE ?1 OR lower(tt.group_name) LIKE ?1",
            );
        }
        sql.push_str(" ORDER BY tt.created_at DESC, tt.id DESC");

        let mut stmt = conn.prepare(&sql)?;
        let rows = if let Some(p) = pattern {
            stmt.query_map(params![p], Self::map_view_row)?
                .collect::<SqliteResult<Vec<_>>>()?
        } else {
            stmt.query_map([], Self::map_view_row)?
                .collect::<SqliteResult<Vec<_>>>()?
        };
        Ok(rows)
    }

    /// 按批次号查询一次结账的全部交易行 (行ID 升序，即小票行顺序)
    pub fn find_by_batch(&self, batch_id: &str) -> RepositoryResult<Vec<TransactionView>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                tt.id,
                tt.batch_id,
                tt.buyer_name,
                tt.group_name,
                tt.ticket_type_id,
                jt.name,
                jt.price,
                tt.quantity,
                tt.line_total,
                tt.payment_method,
                tt.visit_date,
                tt.created_at
            FROM ticket_transaction tt
            JOIN ticket_type jt ON jt.id = tt.ticket_type_id
            WHERE tt.batch_id = ?1
            ORDER BY tt.id ASC
            "#,
        )?;

        let rows = stmt
            .query_map(params![batch_id], Self::map_view_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    /// 统计某票种被引用的交易行数 (测试与诊断用)
    pub fn count_by_ticket_type(&self, ticket_type_id: i64) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM ticket_transaction WHERE ticket_type_id = ?1",
            params![ticket_type_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

// ==========================================
// 持久化协作者接口实现
// ==========================================
// CheckoutGuard 通过 TransactionWriter 触达持久化层，
// 错误以字符串形式上抛并由收银层归类为 Persistence
impl TransactionWriter for TransactionRepository {
    fn write_batch(&self, rows: &[NewTransaction]) -> Result<Vec<i64>, String> {
        self.insert_batch(rows).map_err(|e| e.to_string())
    }
}
