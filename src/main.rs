// ==========================================
// 红树林景区售票收银系统 - Tauri 主入口
// ==========================================
// 技术栈: Tauri + Rust + SQLite
// 系统定位: 线下售票终端 (单收银员会话)
// ==========================================

// 禁止控制台窗口 (Windows)
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(feature = "tauri-app")]
fn main() {
    use mangrove_pos::app::tauri_commands::*;
    use mangrove_pos::app::{get_default_db_path, AppState};

    // 初始化日志系统
    tracing_subscriber::fmt::init();

    tracing::info!("==================================================");
    tracing::info!("{}", mangrove_pos::APP_NAME);
    tracing::info!("系统版本: {}", mangrove_pos::VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    // 创建AppState
    tracing::info!("正在初始化AppState...");
    let app_state = AppState::new(db_path).expect("无法初始化AppState");

    tracing::info!("AppState初始化成功");
    tracing::info!("启动Tauri应用...");

    // 启动Tauri应用
    tauri::Builder::default()
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            // ==========================================
            // 票种目录相关命令 (5个)
            // ==========================================
            list_ticket_types,
            create_ticket_type,
            update_ticket_type,
            set_ticket_type_active,
            delete_ticket_type,

            // ==========================================
            // 收银台相关命令 (10个)
            // ==========================================
            list_active_tickets,
            checkout_phase,
            add_to_cart,
            adjust_cart_quantity,
            remove_from_cart,
            clear_cart,
            cart_summary,
            checkout,
            current_receipt,
            acknowledge_checkout,

            // ==========================================
            // 交易历史相关命令 (2个)
            // ==========================================
            list_transactions,
            receipt_for_batch,

            // ==========================================
            // 配置管理相关命令 (4个)
            // ==========================================
            list_configs,
            get_config,
            set_config,
            get_site_profile,
        ])
        .run(tauri::generate_context!())
        .expect("启动Tauri应用失败");

    tracing::info!("Tauri应用已退出");
}

#[cfg(not(feature = "tauri-app"))]
fn main() {
    println!("==================================================");
    println!("{}", mangrove_pos::APP_NAME);
    println!("系统版本: {}", mangrove_pos::VERSION);
    println!("==================================================");
    println!();
    println!("此可执行文件需要启用 tauri-app 特性");
    println!("使用: cargo run --features tauri-app");
    println!();
    println!("或者使用库模式:");
    println!("use mangrove_pos::app::AppState;");
}
