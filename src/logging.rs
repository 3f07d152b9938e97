// ==========================================
// 日志系统初始化
// ==========================================
// 收银终端日志: 单机桌面环境，输出走 stderr，
// 供现场排障时随应用日志一起收集
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器
///   例如: RUST_LOG=debug 或 RUST_LOG=mangrove_pos=trace
///
/// 缺省只放行本 crate 的 info 及以上，依赖库降噪到 warn。
/// 收银员看不到控制台，紧凑格式即可
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,mangrove_pos=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
