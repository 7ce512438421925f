//! End-to-end flow: paste a menu, take orders, render the summary.

use chrono::{Locale, NaiveDate};

use makan_core::menu::create_menu_from_text;
use makan_core::order::{OrderForm, OrderLine, submit_order};
use makan_core::summary::{NO_ORDERS_SENTINEL, render_menu_summary};
use makan_db::queries::orders;
use makan_test_utils::{create_test_db, drop_test_db};

const PASTED_MENU: &str = "Assalamualaikum semua\n\
                           MENU HARI INI\n\
                           Ayam Masak Merah\n\
                           Nasi Goreng Kampung\n\
                           Ikan Keli Berlada\n\
                           Sayur Campur\n\
                           Harga RM8 sahaja\n\
                           Delivery bermula 11am\n\
                           Order sebelum 10.30am ye";

fn line(item: &str, qty: i32) -> OrderLine {
    OrderLine {
        item_name: item.to_owned(),
        quantity: qty,
    }
}

#[tokio::test]
async fn fresh_menu_renders_the_empty_sentinel() {
    let (pool, db_name) = create_test_db().await;

    let (menu, _) = create_menu_from_text(
        &pool,
        PASTED_MENU,
        NaiveDate::from_ymd_opt(2025, 8, 22).unwrap(),
        false,
    )
    .await
    .unwrap();

    let rendered = render_menu_summary(&pool, menu.id).await.unwrap();
    assert_eq!(rendered, NO_ORDERS_SENTINEL);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn full_flow_from_pasted_text_to_summary() {
    let (pool, db_name) = create_test_db().await;

    let menu_date = NaiveDate::from_ymd_opt(2025, 8, 22).unwrap();
    let (menu, items) = create_menu_from_text(&pool, PASTED_MENU, menu_date, false)
        .await
        .unwrap();

    let names: Vec<&str> = items.iter().map(|i| i.item_name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Nasi Putih",
            "Ayam Masak Merah",
            "Nasi Goreng Kampung",
            "Ikan Keli Berlada",
            "Sayur Campur",
        ]
    );

    let ali = OrderForm {
        customer_name: "Ali".to_owned(),
        lines: vec![line("Nasi Putih", 1), line("Ayam Masak Merah", 1)],
        remarks: Some("less spicy".to_owned()),
    };
    let siti = OrderForm {
        customer_name: "Siti".to_owned(),
        lines: vec![line("Nasi Goreng Kampung", 2)],
        remarks: None,
    };

    let (ali_order, _) = submit_order(&pool, menu.id, &ali).await.unwrap();
    submit_order(&pool, menu.id, &siti).await.unwrap();
    orders::set_order_paid(&pool, ali_order.id, true).await.unwrap();

    let rendered = render_menu_summary(&pool, menu.id).await.unwrap();

    // Header carries the Malay long date for the menu's date.
    let header = format!(
        "📋 *Order List - {}*\n\n",
        menu_date.format_localized("%A, %-d %B %Y", Locale::ms_MY)
    );
    assert!(rendered.starts_with(&header));

    let expected_ali = "1. *Ali*\n   \
                        • Nasi Putih × 1\n   \
                        • Ayam Masak Merah × 1\n   \
                        💬 less spicy\n   \
                        ✅ Paid\n\n";
    let expected_siti = "2. *Siti*\n   \
                        • Nasi Goreng Kampung × 2\n\n";
    assert_eq!(rendered, format!("{header}{expected_ali}{expected_siti}"));

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn summary_fails_for_missing_menu() {
    let (pool, db_name) = create_test_db().await;

    let err = render_menu_summary(&pool, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not found"));

    pool.close().await;
    drop_test_db(&db_name).await;
}
