use crate::app::state::AppState;

// ==========================================
// 配置管理相关命令
// ==========================================

/// 查询所有配置
#[tauri::command(rename_all = "snake_case")]
pub async fn list_configs(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state
        .config_manager
        .list_configs()
        .map_err(|e| format!("查询配置失败: {}", e))?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 查询单个配置
#[tauri::command(rename_all = "snake_case")]
pub async fn get_config(
    state: tauri::State<'_, AppState>,
    key: String,
) -> Result<String, String> {
    let result = state
        .config_manager
        .get_config_value(&key)
        .map_err(|e| format!("查询配置失败: {}", e))?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 更新配置 (UPSERT)
#[tauri::command(rename_all = "snake_case")]
pub async fn set_config(
    state: tauri::State<'_, AppState>,
    key: String,
    value: String,
) -> Result<String, String> {
    state
        .config_manager
        .set_config_value(&key, &value)
        .map_err(|e| format!("更新配置失败: {}", e))?;

    Ok("{}".to_string())
}

/// 查询站点信息 (小票票头/票尾)
#[tauri::command(rename_all = "snake_case")]
pub async fn get_site_profile(state: tauri::State<'_, AppState>) -> Result<String, String> {
    serde_json::to_string(&state.config_manager.site_profile())
        .map_err(|e| format!("序列化失败: {}", e))
}
