//! Database query functions for the `orders` table.

use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Order;

/// Aggregate order counters for one menu.
#[derive(Debug, Clone, Copy, Serialize, sqlx::FromRow)]
pub struct OrderStats {
    pub total: i64,
    pub paid: i64,
}

/// Insert a new order row. Returns the inserted order with server-generated
/// defaults (id, created_at).
pub async fn insert_order(
    pool: &PgPool,
    menu_id: Uuid,
    customer_name: &str,
    remarks: Option<&str>,
    is_paid: bool,
) -> Result<Order> {
    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (menu_id, customer_name, remarks, is_paid) \
         VALUES ($1, $2, $3, $4) \
         RETURNING *",
    )
    .bind(menu_id)
    .bind(customer_name)
    .bind(remarks)
    .bind(is_paid)
    .fetch_one(pool)
    .await
    .context("failed to insert order")?;

    Ok(order)
}

/// Fetch an order by its ID.
pub async fn get_order(pool: &PgPool, id: Uuid) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch order")?;

    Ok(order)
}

/// List a menu's orders in submission order (oldest first).
pub async fn list_orders_for_menu(pool: &PgPool, menu_id: Uuid) -> Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE menu_id = $1 ORDER BY created_at ASC",
    )
    .bind(menu_id)
    .fetch_all(pool)
    .await
    .context("failed to list orders")?;

    Ok(orders)
}

/// Mark an order as paid or unpaid.
pub async fn set_order_paid(pool: &PgPool, id: Uuid, is_paid: bool) -> Result<()> {
    let result = sqlx::query("UPDATE orders SET is_paid = $1 WHERE id = $2")
        .bind(is_paid)
        .bind(id)
        .execute(pool)
        .await
        .context("failed to update order payment status")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("order {id} not found");
    }

    Ok(())
}

/// Delete an order. Its details cascade.
pub async fn delete_order(pool: &PgPool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to delete order")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("order {id} not found");
    }

    Ok(())
}

/// Total and paid order counts for a menu.
pub async fn order_stats_for_menu(pool: &PgPool, menu_id: Uuid) -> Result<OrderStats> {
    let stats = sqlx::query_as::<_, OrderStats>(
        "SELECT COUNT(*) AS total, \
                COUNT(*) FILTER (WHERE is_paid) AS paid \
         FROM orders WHERE menu_id = $1",
    )
    .bind(menu_id)
    .fetch_one(pool)
    .await
    .context("failed to compute order stats")?;

    Ok(stats)
}
