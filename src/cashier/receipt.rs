// ==========================================
// 红树林景区售票收银系统 - 小票渲染
// ==========================================
// 职责: CheckoutResult -> 热敏小票文本 (32 列)
// 纯函数: 无副作用、无外部调用，同一输入字节级一致，
// 可任意次重打而不触达结账状态机
// ==========================================

use crate::cashier::checkout::CheckoutResult;
use crate::config::SiteProfile;
use crate::domain::TransactionView;

/// 热敏小票宽度 (字符数)
pub const RECEIPT_WIDTH: usize = 32;

// 行布局: 名称 17 + " x" + 数量 2 + 空格 + 金额 10 = 32
const NAME_WIDTH: usize = 17;
const AMOUNT_WIDTH: usize = 10;

/// 金额格式化: 印尼千分位 (15000 -> "15.000")
pub fn format_rupiah(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= RECEIPT_WIDTH {
        return text.to_string();
    }
    let pad = (RECEIPT_WIDTH - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn separator() -> String {
    "-".repeat(RECEIPT_WIDTH)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

fn item_line(name: &str, quantity: i64, line_total: i64) -> String {
    format!(
        "{:<name_w$} x{:>2} {:>amount_w$}",
        truncate(name, NAME_WIDTH),
        quantity,
        format_rupiah(line_total),
        name_w = NAME_WIDTH,
        amount_w = AMOUNT_WIDTH,
    )
}

fn total_line(label: &str, amount: i64) -> String {
    format!(
        "{:<label_w$}{:>amount_w$}",
        label,
        format_rupiah(amount),
        label_w = RECEIPT_WIDTH - AMOUNT_WIDTH,
        amount_w = AMOUNT_WIDTH,
    )
}

/// 渲染结账小票
///
/// 可重复调用 (重打)，输出字节级一致
pub fn render_receipt(result: &CheckoutResult, profile: &SiteProfile) -> String {
    let mut lines: Vec<String> = Vec::new();

    // 票头
    lines.push(center(&profile.site_name.to_uppercase()));
    lines.push(center(&profile.site_address));
    lines.push(separator());

    // 交易信息
    lines.push(format!(
        "Tanggal : {}",
        result.timestamp.format("%d/%m/%Y %H:%M")
    ));
    lines.push(format!("Pembeli : {}", result.buyer_name));
    lines.push(format!("Kelompok: {}", result.group_name));
    lines.push(format!(
        "Ref     : {}",
        result.batch_id.get(..8).unwrap_or(&result.batch_id)
    ));
    lines.push(separator());

    // 票项 (保持购物车行序)
    for line in &result.lines {
        lines.push(item_line(&line.ticket.name, line.quantity, line.line_total()));
    }
    lines.push(separator());

    // 金额汇总
    lines.push(total_line("TOTAL", result.total_due));
    lines.push(total_line("Bayar", result.amount_tendered));
    lines.push(total_line("Kembali", result.change_due));
    lines.push(separator());

    // 票尾
    lines.push(center(&profile.receipt_footer));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// 从历史交易行补打小票
///
/// 实收/找零不落库，补打小票只含票项与总额
pub fn render_batch_receipt(rows: &[TransactionView], profile: &SiteProfile) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(center(&profile.site_name.to_uppercase()));
    lines.push(center(&profile.site_address));
    lines.push(center("-- CETAK ULANG --"));
    lines.push(separator());

    if let Some(first) = rows.first() {
        lines.push(format!(
            "Tanggal : {}",
            first.created_at.format("%d/%m/%Y %H:%M")
        ));
        lines.push(format!("Pembeli : {}", first.buyer_name));
        lines.push(format!("Kelompok: {}", first.group_name));
        lines.push(format!(
            "Ref     : {}",
            first.batch_id.get(..8).unwrap_or(&first.batch_id)
        ));
    }
    lines.push(separator());

    let mut total = 0i64;
    for row in rows {
        lines.push(item_line(&row.ticket_name, row.quantity, row.line_total));
        total += row.line_total;
    }
    lines.push(separator());
    lines.push(total_line("TOTAL", total));
    lines.push(separator());
    lines.push(center(&profile.receipt_footer));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cashier::cart::CartLine;
    use crate::domain::types::PaymentMethod;
    use crate::domain::TicketType;
    use chrono::NaiveDate;

    fn ticket(id: i64, name: &str, price: i64) -> TicketType {
        let ts = NaiveDate::from_ymd_opt(2026, 8, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        TicketType {
            id,
            name: name.to_string(),
            price,
            active: true,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn sample_result() -> CheckoutResult {
        CheckoutResult {
            transaction_ids: vec![12, 13],
            batch_id: "1a2b3c4d-0000-0000-0000-000000000000".to_string(),
            total_due: 40000,
            amount_tendered: 50000,
            change_due: 10000,
            lines: vec![
                CartLine {
                    ticket: ticket(1, "Tiket Dewasa", 15000),
                    quantity: 2,
                },
                CartLine {
                    ticket: ticket(2, "Tiket Anak", 10000),
                    quantity: 1,
                },
            ],
            buyer_name: "Budi".to_string(),
            group_name: "-".to_string(),
            payment_method: PaymentMethod::Tunai,
            visit_date: NaiveDate::from_ymd_opt(2026, 8, 23).unwrap(),
            timestamp: NaiveDate::from_ymd_opt(2026, 8, 23)
                .unwrap()
                .and_hms_opt(14, 5, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0), "0");
        assert_eq!(format_rupiah(500), "500");
        assert_eq!(format_rupiah(15000), "15.000");
        assert_eq!(format_rupiah(1250000), "1.250.000");
        assert_eq!(format_rupiah(-40000), "-40.000");
    }

    #[test]
    fn test_receipt_contains_totals_and_items() {
        let receipt = render_receipt(&sample_result(), &SiteProfile::default());

        assert!(receipt.contains("WISATA MANGROVE"));
        assert!(receipt.contains("Tiket Dewasa"));
        assert!(receipt.contains("x 2"));
        assert!(receipt.contains("30.000")); // 行小计 15000x2
        assert!(receipt.contains("40.000")); // TOTAL
        assert!(receipt.contains("50.000")); // Bayar
        assert!(receipt.contains("10.000")); // Kembali
        assert!(receipt.contains("Terima Kasih"));
        assert!(receipt.contains("Ref     : 1a2b3c4d"));
    }

    #[test]
    fn test_receipt_is_byte_identical_on_reprint() {
        let result = sample_result();
        let profile = SiteProfile::default();

        let first = render_receipt(&result, &profile);
        let second = render_receipt(&result, &profile);
        assert_eq!(first, second, "重打小票必须字节级一致");
    }

    #[test]
    fn test_long_ticket_name_truncated_to_width() {
        let mut result = sample_result();
        result.lines[0].ticket.name =
            "Paket Edukasi Mangrove Lengkap Dengan Pemandu".to_string();

        let receipt = render_receipt(&result, &SiteProfile::default());
        for line in receipt.lines() {
            assert!(
                line.chars().count() <= RECEIPT_WIDTH,
                "超宽行: {:?}",
                line
            );
        }
    }
}
