use crate::app::state::AppState;
use crate::domain::types::DeleteOutcome;
use crate::i18n::t;

use super::common::map_api_error;

// ==========================================
// 票种目录相关命令
// ==========================================

/// 查询票种列表
#[tauri::command(rename_all = "snake_case")]
pub async fn list_ticket_types(
    state: tauri::State<'_, AppState>,
    active_only: bool,
) -> Result<String, String> {
    let result = state
        .catalog_api
        .list_ticket_types(active_only)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 新建票种
#[tauri::command(rename_all = "snake_case")]
pub async fn create_ticket_type(
    state: tauri::State<'_, AppState>,
    name: String,
    price: i64,
) -> Result<String, String> {
    let result = state
        .catalog_api
        .create_ticket_type(&name, price)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 更新票种
#[tauri::command(rename_all = "snake_case")]
pub async fn update_ticket_type(
    state: tauri::State<'_, AppState>,
    id: i64,
    name: String,
    price: i64,
) -> Result<String, String> {
    let result = state
        .catalog_api
        .update_ticket_type(id, &name, price)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 上架/停用票种
#[tauri::command(rename_all = "snake_case")]
pub async fn set_ticket_type_active(
    state: tauri::State<'_, AppState>,
    id: i64,
    active: bool,
) -> Result<String, String> {
    state
        .catalog_api
        .set_ticket_type_active(id, active)
        .map_err(map_api_error)?;

    Ok("{}".to_string())
}

/// 删除票种 (有交易引用时自动回退为停用)
#[tauri::command(rename_all = "snake_case")]
pub async fn delete_ticket_type(
    state: tauri::State<'_, AppState>,
    id: i64,
) -> Result<String, String> {
    let outcome = state
        .catalog_api
        .delete_ticket_type(id)
        .map_err(map_api_error)?;

    let message = match outcome {
        DeleteOutcome::Deleted => t("catalog.deleted"),
        DeleteOutcome::Deactivated => t("catalog.deactivated"),
    };

    serde_json::to_string(&serde_json::json!({
        "outcome": outcome,
        "message": message,
    }))
    .map_err(|e| format!("序列化失败: {}", e))
}
