//! Database query functions for the `menu_items` table.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::MenuItem;

/// Insert one menu item.
pub async fn insert_menu_item(pool: &PgPool, menu_id: Uuid, item_name: &str) -> Result<MenuItem> {
    let item = sqlx::query_as::<_, MenuItem>(
        "INSERT INTO menu_items (menu_id, item_name) \
         VALUES ($1, $2) \
         RETURNING *",
    )
    .bind(menu_id)
    .bind(item_name)
    .fetch_one(pool)
    .await
    .context("failed to insert menu item")?;

    Ok(item)
}

/// List a menu's items in extraction order.
pub async fn list_items_for_menu(pool: &PgPool, menu_id: Uuid) -> Result<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT * FROM menu_items WHERE menu_id = $1 ORDER BY id ASC",
    )
    .bind(menu_id)
    .fetch_all(pool)
    .await
    .context("failed to list menu items")?;

    Ok(items)
}
