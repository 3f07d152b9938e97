// ==========================================
// 红树林景区售票收银系统 - 交易历史API
// ==========================================
// 职责: 历史交易查询与补打小票
// 只读: 本层不修改任何交易行
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::cashier::render_batch_receipt;
use crate::config::ConfigManager;
use crate::domain::TransactionView;
use crate::repository::TransactionRepository;
use std::sync::Arc;

pub struct HistoryApi {
    transaction_repo: Arc<TransactionRepository>,
    config_manager: Arc<ConfigManager>,
}

impl HistoryApi {
    pub fn new(
        transaction_repo: Arc<TransactionRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            transaction_repo,
            config_manager,
        }
    }

    /// 查询交易历史 (最新在前)
    ///
    /// # 参数
    /// - search: 按购票人/团体名称子串过滤 (不区分大小写)
    pub fn list_transactions(&self, search: Option<&str>) -> ApiResult<Vec<TransactionView>> {
        Ok(self.transaction_repo.list(search)?)
    }

    /// 按批次号补打小票
    ///
    /// 实收/找零不落库，补打小票仅含票项与总额
    pub fn receipt_for_batch(&self, batch_id: &str) -> ApiResult<String> {
        let batch_id = batch_id.trim();
        if batch_id.is_empty() {
            return Err(ApiError::InvalidInput("批次号不能为空".to_string()));
        }

        let rows = self.transaction_repo.find_by_batch(batch_id)?;
        if rows.is_empty() {
            return Err(ApiError::NotFound(format!("批次({})不存在", batch_id)));
        }
        Ok(render_batch_receipt(&rows, &self.config_manager.site_profile()))
    }
}
