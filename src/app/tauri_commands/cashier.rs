use crate::app::state::AppState;
use crate::domain::types::PaymentMethod;

use super::common::map_api_error;

// ==========================================
// 收银台相关命令
// ==========================================

/// 收银端目录: 仅在售票种
#[tauri::command(rename_all = "snake_case")]
pub async fn list_active_tickets(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state
        .cashier_api
        .list_active_tickets()
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 当前结账阶段 (界面据此禁用结账按钮)
#[tauri::command(rename_all = "snake_case")]
pub async fn checkout_phase(state: tauri::State<'_, AppState>) -> Result<String, String> {
    serde_json::to_string(&state.cashier_api.checkout_phase())
        .map_err(|e| format!("序列化失败: {}", e))
}

/// 加入票种到购物车
#[tauri::command(rename_all = "snake_case")]
pub async fn add_to_cart(
    state: tauri::State<'_, AppState>,
    ticket_id: i64,
) -> Result<String, String> {
    let result = state
        .cashier_api
        .add_to_cart(ticket_id)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 调整购物车行数量
#[tauri::command(rename_all = "snake_case")]
pub async fn adjust_cart_quantity(
    state: tauri::State<'_, AppState>,
    ticket_id: i64,
    delta: i64,
) -> Result<String, String> {
    let result = state
        .cashier_api
        .adjust_quantity(ticket_id, delta)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 移除购物车行
#[tauri::command(rename_all = "snake_case")]
pub async fn remove_from_cart(
    state: tauri::State<'_, AppState>,
    ticket_id: i64,
) -> Result<String, String> {
    let result = state
        .cashier_api
        .remove_from_cart(ticket_id)
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 清空购物车
#[tauri::command(rename_all = "snake_case")]
pub async fn clear_cart(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state.cashier_api.clear_cart().map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 购物车汇总
#[tauri::command(rename_all = "snake_case")]
pub async fn cart_summary(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state.cashier_api.cart_summary().map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 提交结账
///
/// 重复提交 (回车双击/按键连发) 返回 accepted=false，无新交易产生
#[tauri::command(rename_all = "snake_case")]
pub async fn checkout(
    state: tauri::State<'_, AppState>,
    buyer_name: String,
    group_name: Option<String>,
    amount_tendered: i64,
    payment_method: Option<String>,
) -> Result<String, String> {
    let payment_method = payment_method
        .as_deref()
        .map(PaymentMethod::from_db_str)
        .unwrap_or_default();

    let result = state
        .cashier_api
        .checkout(
            &buyer_name,
            group_name.as_deref(),
            amount_tendered,
            payment_method,
        )
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 重打当前小票
#[tauri::command(rename_all = "snake_case")]
pub async fn current_receipt(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state.cashier_api.current_receipt().map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}

/// 收银员确认 (关闭小票，解锁状态机)
#[tauri::command(rename_all = "snake_case")]
pub async fn acknowledge_checkout(state: tauri::State<'_, AppState>) -> Result<String, String> {
    state.cashier_api.acknowledge().map_err(map_api_error)?;

    Ok("{}".to_string())
}
