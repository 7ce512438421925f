//! Database query functions for the `order_details` table.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::OrderDetail;

/// Insert one order line.
pub async fn insert_order_detail(
    pool: &PgPool,
    order_id: Uuid,
    item_name: &str,
    quantity: i32,
) -> Result<OrderDetail> {
    let detail = sqlx::query_as::<_, OrderDetail>(
        "INSERT INTO order_details (order_id, item_name, quantity) \
         VALUES ($1, $2, $3) \
         RETURNING *",
    )
    .bind(order_id)
    .bind(item_name)
    .bind(quantity)
    .fetch_one(pool)
    .await
    .context("failed to insert order detail")?;

    Ok(detail)
}

/// List an order's lines in the order they were submitted.
pub async fn list_details_for_order(pool: &PgPool, order_id: Uuid) -> Result<Vec<OrderDetail>> {
    let details = sqlx::query_as::<_, OrderDetail>(
        "SELECT * FROM order_details WHERE order_id = $1 ORDER BY id ASC",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await
    .context("failed to list order details")?;

    Ok(details)
}
