//! Loading order data and rendering the summary for a menu.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use makan_db::queries::{menus, order_details, orders};

use super::format::{SUMMARY_LOCALE, SummaryEntry, format_order_summary};

/// Load a menu's orders with their lines, in submission order.
pub async fn load_summary_entries(pool: &PgPool, menu_id: Uuid) -> Result<Vec<SummaryEntry>> {
    let menu_orders = orders::list_orders_for_menu(pool, menu_id).await?;

    let mut entries = Vec::with_capacity(menu_orders.len());
    for order in menu_orders {
        let details = order_details::list_details_for_order(pool, order.id).await?;
        entries.push(SummaryEntry { order, details });
    }

    Ok(entries)
}

/// Render the chat-ready summary for a menu.
pub async fn render_menu_summary(pool: &PgPool, menu_id: Uuid) -> Result<String> {
    let menu = menus::get_menu(pool, menu_id)
        .await?
        .with_context(|| format!("menu {menu_id} not found"))?;

    let entries = load_summary_entries(pool, menu_id).await?;

    Ok(format_order_summary(&entries, menu.menu_date, SUMMARY_LOCALE))
}
