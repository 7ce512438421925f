//! Menu service layer.
//!
//! Creating a menu inserts the menu row and every extracted item within a
//! single database transaction.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use makan_db::models::{Menu, MenuItem};
use makan_db::queries::orders::{self, OrderStats};
use makan_db::queries::{menu_items, menus};

use super::extract::extract_menu_items;
use crate::summary::{SummaryEntry, load_summary_entries};

/// A menu with its items and order counters, as shown by `menu show` and
/// the share server.
#[derive(Debug, Clone, Serialize)]
pub struct MenuOverview {
    pub menu: Menu,
    pub items: Vec<MenuItem>,
    pub stats: OrderStats,
}

/// The full aggregate for one menu: the overview plus every order with its
/// lines. Serialized as-is by `export` and the share server's detail route.
#[derive(Debug, Clone, Serialize)]
pub struct MenuExport {
    pub menu: Menu,
    pub items: Vec<MenuItem>,
    pub orders: Vec<SummaryEntry>,
    pub stats: OrderStats,
}

/// Create a menu for `menu_date` from a pasted chat message.
///
/// Items are extracted with the default rules and inserted in extraction
/// order. If any insert fails, the whole operation rolls back.
pub async fn create_menu_from_text(
    pool: &PgPool,
    raw_text: &str,
    menu_date: NaiveDate,
    is_closed: bool,
) -> Result<(Menu, Vec<MenuItem>)> {
    let item_names = extract_menu_items(raw_text);

    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    let menu = sqlx::query_as::<_, Menu>(
        "INSERT INTO menus (menu_date, is_closed) VALUES ($1, $2) RETURNING *",
    )
    .bind(menu_date)
    .bind(is_closed)
    .fetch_one(&mut *tx)
    .await
    .context("failed to insert menu")?;

    let mut items = Vec::with_capacity(item_names.len());
    for name in &item_names {
        let item = sqlx::query_as::<_, MenuItem>(
            "INSERT INTO menu_items (menu_id, item_name) VALUES ($1, $2) RETURNING *",
        )
        .bind(menu.id)
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .with_context(|| format!("failed to insert menu item {name:?}"))?;

        items.push(item);
    }

    tx.commit().await.context("failed to commit transaction")?;

    info!(menu_id = %menu.id, items = items.len(), "menu created");
    Ok((menu, items))
}

/// Fetch a menu with its items and order counters.
pub async fn menu_overview(pool: &PgPool, menu_id: Uuid) -> Result<MenuOverview> {
    let menu = menus::get_menu(pool, menu_id)
        .await?
        .with_context(|| format!("menu {menu_id} not found"))?;

    let items = menu_items::list_items_for_menu(pool, menu_id).await?;
    let stats = orders::order_stats_for_menu(pool, menu_id).await?;

    Ok(MenuOverview { menu, items, stats })
}

/// Fetch everything known about a menu, orders included.
pub async fn menu_export(pool: &PgPool, menu_id: Uuid) -> Result<MenuExport> {
    let MenuOverview { menu, items, stats } = menu_overview(pool, menu_id).await?;
    let menu_orders = load_summary_entries(pool, menu_id).await?;

    Ok(MenuExport {
        menu,
        items,
        orders: menu_orders,
        stats,
    })
}
