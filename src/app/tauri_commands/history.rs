use crate::app::state::AppState;

use super::common::map_api_error;

// ==========================================
// 交易历史相关命令
// ==========================================

/// 查询交易历史 (可按购票人/团体名称过滤)
#[tauri::command(rename_all = "snake_case")]
pub async fn list_transactions(
    state: tauri::State<'_, AppState>,
    search: Option<String>,
) -> Result<String, String> {
    let result = state
        .history_api
        .list_transactions(search.as_deref())
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 按批次号补打小票
#[tauri::command(rename_all = "snake_case")]
pub async fn receipt_for_batch(
    state: tauri::State<'_, AppState>,
    batch_id: String,
) -> Result<String, String> {
    let result = state
        .history_api
        .receipt_for_batch(&batch_id)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}
