//! Chat-ready rendering of a menu's orders.
//!
//! The output is pasted verbatim into group chats, so every symbol, indent,
//! and blank line is part of the contract with readers. Orders render in
//! the order given; lines render in the order given; only quantities above
//! zero appear.

use chrono::{Locale, NaiveDate};
use serde::Serialize;

use makan_db::models::{Order, OrderDetail};

/// Returned when a menu has no orders to summarize.
pub const NO_ORDERS_SENTINEL: &str = "No orders yet.";

/// Long-form date layout used in the summary header.
pub const SUMMARY_DATE_FORMAT: &str = "%A, %-d %B %Y";

/// Locale production summaries render dates in.
pub const SUMMARY_LOCALE: Locale = Locale::ms_MY;

/// One order with its lines, in submission order.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryEntry {
    pub order: Order,
    pub details: Vec<OrderDetail>,
}

/// Render all orders for one menu date into a chat-ready block.
pub fn format_order_summary(
    entries: &[SummaryEntry],
    menu_date: NaiveDate,
    locale: Locale,
) -> String {
    if entries.is_empty() {
        return NO_ORDERS_SENTINEL.to_owned();
    }

    let date_str = menu_date.format_localized(SUMMARY_DATE_FORMAT, locale);

    let mut out = String::new();
    out.push_str(&format!("📋 *Order List - {date_str}*\n\n"));

    for (index, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "{}. *{}*\n",
            index + 1,
            entry.order.customer_name
        ));

        for detail in &entry.details {
            if detail.quantity > 0 {
                out.push_str(&format!(
                    "   • {} × {}\n",
                    detail.item_name, detail.quantity
                ));
            }
        }

        if let Some(remarks) = entry.order.remarks.as_deref() {
            let remarks = remarks.trim();
            if !remarks.is_empty() {
                out.push_str(&format!("   💬 {remarks}\n"));
            }
        }

        if entry.order.is_paid {
            out.push_str("   ✅ Paid\n");
        }

        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn order(name: &str, remarks: Option<&str>, is_paid: bool) -> Order {
        Order {
            id: Uuid::new_v4(),
            menu_id: Uuid::new_v4(),
            customer_name: name.to_owned(),
            remarks: remarks.map(str::to_owned),
            is_paid,
            created_at: Utc::now(),
        }
    }

    fn lines(order_id: Uuid, items: &[(&str, i32)]) -> Vec<OrderDetail> {
        items
            .iter()
            .enumerate()
            .map(|(i, (item, qty))| OrderDetail {
                id: i as i64 + 1,
                order_id,
                item_name: (*item).to_owned(),
                quantity: *qty,
            })
            .collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_orders_return_sentinel_for_any_date() {
        assert_eq!(
            format_order_summary(&[], date(2025, 8, 22), Locale::ms_MY),
            "No orders yet."
        );
        assert_eq!(
            format_order_summary(&[], date(1999, 1, 1), Locale::en_US),
            "No orders yet."
        );
    }

    #[test]
    fn renders_one_full_order_block() {
        let order = order("Ali", Some("less spicy"), true);
        let details = lines(order.id, &[("Nasi Putih", 1), ("Ayam", 0)]);
        let entries = vec![SummaryEntry { order, details }];

        let text = format_order_summary(&entries, date(2025, 8, 22), Locale::en_US);

        assert_eq!(
            text,
            "📋 *Order List - Friday, 22 August 2025*\n\
             \n\
             1. *Ali*\n   \
             • Nasi Putih × 1\n   \
             💬 less spicy\n   \
             ✅ Paid\n\
             \n"
        );
        // The zero-quantity line stays out of the rendering.
        assert!(!text.contains("Ayam ×"));
    }

    #[test]
    fn orders_and_lines_keep_given_order() {
        let first = order("Siti", None, false);
        let first_lines = lines(first.id, &[("Sayur Campur", 2), ("Nasi Putih", 1)]);
        let second = order("Chen", None, false);
        let second_lines = lines(second.id, &[("Ayam Masak Merah", 1)]);

        let entries = vec![
            SummaryEntry {
                order: first,
                details: first_lines,
            },
            SummaryEntry {
                order: second,
                details: second_lines,
            },
        ];

        let text = format_order_summary(&entries, date(2025, 8, 22), Locale::en_US);

        let siti = text.find("1. *Siti*").expect("first order present");
        let chen = text.find("2. *Chen*").expect("second order present");
        assert!(siti < chen);

        let sayur = text.find("• Sayur Campur × 2").expect("first line present");
        let nasi = text.find("• Nasi Putih × 1").expect("second line present");
        assert!(sayur < nasi, "lines must keep submission order");
    }

    #[test]
    fn blank_remarks_are_omitted() {
        let order = order("Ali", Some("   "), false);
        let details = lines(order.id, &[("Nasi Putih", 1)]);
        let text = format_order_summary(
            &[SummaryEntry { order, details }],
            date(2025, 8, 22),
            Locale::en_US,
        );
        assert!(!text.contains("💬"));
    }

    #[test]
    fn remarks_are_trimmed_in_output() {
        let order = order("Ali", Some("  tapau please  "), false);
        let details = lines(order.id, &[("Nasi Putih", 1)]);
        let text = format_order_summary(
            &[SummaryEntry { order, details }],
            date(2025, 8, 22),
            Locale::en_US,
        );
        assert!(text.contains("   💬 tapau please\n"));
    }

    #[test]
    fn unpaid_orders_carry_no_paid_marker() {
        let order = order("Ali", None, false);
        let details = lines(order.id, &[("Nasi Putih", 1)]);
        let text = format_order_summary(
            &[SummaryEntry { order, details }],
            date(2025, 8, 22),
            Locale::en_US,
        );
        assert!(!text.contains("✅"));
    }

    #[test]
    fn header_uses_malay_locale_in_production_config() {
        let order = order("Ali", None, false);
        let details = lines(order.id, &[("Nasi Putih", 1)]);
        let text = format_order_summary(
            &[SummaryEntry { order, details }],
            date(2025, 8, 22),
            SUMMARY_LOCALE,
        );
        // 2025-08-22 is a Friday; August is Ogos in ms_MY.
        assert!(text.starts_with("📋 *Order List - Jumaat, 22 Ogos 2025*\n\n"));
    }
}
