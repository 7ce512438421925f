//! Database query functions for the `menus` table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Menu;

/// Insert a new menu row. Returns the inserted menu with server-generated
/// defaults (id, created_at).
pub async fn insert_menu(pool: &PgPool, menu_date: NaiveDate, is_closed: bool) -> Result<Menu> {
    let menu = sqlx::query_as::<_, Menu>(
        "INSERT INTO menus (menu_date, is_closed) \
         VALUES ($1, $2) \
         RETURNING *",
    )
    .bind(menu_date)
    .bind(is_closed)
    .fetch_one(pool)
    .await
    .context("failed to insert menu")?;

    Ok(menu)
}

/// Fetch a menu by its ID.
pub async fn get_menu(pool: &PgPool, id: Uuid) -> Result<Option<Menu>> {
    let menu = sqlx::query_as::<_, Menu>("SELECT * FROM menus WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch menu")?;

    Ok(menu)
}

/// List all menus, newest menu date first. Same-day menus fall back to
/// creation time, newest first.
pub async fn list_menus(pool: &PgPool) -> Result<Vec<Menu>> {
    let menus =
        sqlx::query_as::<_, Menu>("SELECT * FROM menus ORDER BY menu_date DESC, created_at DESC")
            .fetch_all(pool)
            .await
            .context("failed to list menus")?;

    Ok(menus)
}

/// Fetch the most recently created menu, if any.
pub async fn latest_menu(pool: &PgPool) -> Result<Option<Menu>> {
    let menu = sqlx::query_as::<_, Menu>("SELECT * FROM menus ORDER BY created_at DESC LIMIT 1")
        .fetch_optional(pool)
        .await
        .context("failed to fetch latest menu")?;

    Ok(menu)
}

/// Open or close ordering on a menu.
pub async fn set_menu_closed(pool: &PgPool, id: Uuid, is_closed: bool) -> Result<()> {
    let result = sqlx::query("UPDATE menus SET is_closed = $1 WHERE id = $2")
        .bind(is_closed)
        .bind(id)
        .execute(pool)
        .await
        .context("failed to update menu status")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("menu {id} not found");
    }

    Ok(())
}

/// Delete a menu. Items, orders, and order details cascade.
pub async fn delete_menu(pool: &PgPool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM menus WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to delete menu")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("menu {id} not found");
    }

    Ok(())
}
