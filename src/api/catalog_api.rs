// ==========================================
// 红树林景区售票收银系统 - 票种目录API
// ==========================================
// 职责: 票种的增删改查与上下架
// 删除策略: 已有交易引用的票种无法物理删除，
// 自动回退为停用 (收银端目录不再展示)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::DeleteOutcome;
use crate::domain::TicketType;
use crate::repository::error::RepositoryError;
use crate::repository::TicketTypeRepository;
use std::sync::Arc;

pub struct CatalogApi {
    ticket_type_repo: Arc<TicketTypeRepository>,
}

impl CatalogApi {
    pub fn new(ticket_type_repo: Arc<TicketTypeRepository>) -> Self {
        Self { ticket_type_repo }
    }

    fn validate_input(name: &str, price: i64) -> ApiResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("票种名称不能为空".to_string()));
        }
        if price < 0 {
            return Err(ApiError::InvalidInput(format!(
                "票种单价不能为负数: {}",
                price
            )));
        }
        Ok(name.to_string())
    }

    /// 查询票种列表
    ///
    /// # 参数
    /// - active_only: true 时只返回在售票种 (收银端目录)
    pub fn list_ticket_types(&self, active_only: bool) -> ApiResult<Vec<TicketType>> {
        Ok(self.ticket_type_repo.list(active_only)?)
    }

    /// 按ID查询票种
    pub fn get_ticket_type(&self, id: i64) -> ApiResult<TicketType> {
        self.ticket_type_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("票种(id={})不存在", id)))
    }

    /// 新建票种 (默认在售)
    pub fn create_ticket_type(&self, name: &str, price: i64) -> ApiResult<TicketType> {
        let name = Self::validate_input(name, price)?;
        let ticket = self.ticket_type_repo.insert(&name, price)?;
        tracing::info!("票种已创建: id={}, name={}, price={}", ticket.id, ticket.name, ticket.price);
        Ok(ticket)
    }

    /// 更新票种名称与单价
    pub fn update_ticket_type(&self, id: i64, name: &str, price: i64) -> ApiResult<TicketType> {
        let name = Self::validate_input(name, price)?;
        self.ticket_type_repo.update(id, &name, price)?;
        tracing::info!("票种已更新: id={}, name={}, price={}", id, name, price);
        self.get_ticket_type(id)
    }

    /// 上架/停用票种
    pub fn set_ticket_type_active(&self, id: i64, active: bool) -> ApiResult<()> {
        self.ticket_type_repo.set_active(id, active)?;
        tracing::info!("票种状态已变更: id={}, active={}", id, active);
        Ok(())
    }

    /// 删除票种
    ///
    /// # 返回
    /// - DeleteOutcome::Deleted: 物理删除成功 (无交易引用)
    /// - DeleteOutcome::Deactivated: 已有交易引用，回退为停用
    pub fn delete_ticket_type(&self, id: i64) -> ApiResult<DeleteOutcome> {
        match self.ticket_type_repo.delete(id) {
            Ok(()) => {
                tracing::info!("票种已删除: id={}", id);
                Ok(DeleteOutcome::Deleted)
            }
            Err(RepositoryError::ForeignKeyViolation(_)) => {
                // 历史交易必须保留票种行以供 JOIN，降级为停用
                self.ticket_type_repo.set_active(id, false)?;
                tracing::info!("票种有交易引用，已回退为停用: id={}", id);
                Ok(DeleteOutcome::Deactivated)
            }
            Err(e) => Err(e.into()),
        }
    }
}
