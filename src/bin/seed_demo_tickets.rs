// ==========================================
// 红树林景区售票收银系统 - 演示票种种子工具
// ==========================================
// 用途: 首次部署/演示时向空目录写入常用票种
// 用法: cargo run --bin seed_demo_tickets
//       (可用 MANGROVE_POS_DB_PATH 指定数据库)
// ==========================================

use anyhow::{Context, Result};
use mangrove_pos::app::get_default_db_path;
use mangrove_pos::logging;
use mangrove_pos::repository::TicketTypeRepository;

// 原景区窗口在售的票种与单价 (整数印尼盾)
const DEMO_TICKETS: &[(&str, i64)] = &[
    ("Tiket Dewasa", 15000),
    ("Tiket Anak", 10000),
    ("Tiket Rombongan Pelajar", 8000),
    ("Parkir Motor", 5000),
    ("Parkir Mobil", 10000),
    ("Paket Susur Mangrove", 25000),
];

fn main() -> Result<()> {
    logging::init();

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let repo = TicketTypeRepository::new(&db_path).context("无法打开票种仓储")?;

    // 目录非空时跳过，避免重复种子
    let existing = repo.list(false).context("查询票种目录失败")?;
    if !existing.is_empty() {
        tracing::info!("票种目录非空 ({} 条)，跳过种子写入", existing.len());
        return Ok(());
    }

    for (name, price) in DEMO_TICKETS {
        let ticket = repo
            .insert(name, *price)
            .with_context(|| format!("写入票种失败: {}", name))?;
        tracing::info!("已写入票种: id={}, {} @ {}", ticket.id, ticket.name, ticket.price);
    }

    tracing::info!("演示票种写入完成: {} 条", DEMO_TICKETS.len());
    Ok(())
}
