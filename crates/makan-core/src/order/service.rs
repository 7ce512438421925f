//! Order service layer.
//!
//! Submitting an order validates the form against the menu, then inserts
//! the order row and its lines within a single database transaction.

use anyhow::{Context, Result, bail};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use makan_db::models::{Order, OrderDetail};
use makan_db::queries::{menu_items, menus};

use super::form::{OrderForm, validate_order_form};

/// Validate and persist an order against a menu.
///
/// Refuses when the menu does not exist or is closed, then applies
/// [`validate_order_form`]. Zero-quantity lines are dropped before
/// persistence; remarks are stored trimmed, with blank remarks stored as
/// NULL.
pub async fn submit_order(
    pool: &PgPool,
    menu_id: Uuid,
    form: &OrderForm,
) -> Result<(Order, Vec<OrderDetail>)> {
    let menu = menus::get_menu(pool, menu_id)
        .await?
        .with_context(|| format!("menu {menu_id} not found"))?;

    if menu.is_closed {
        bail!("orders are closed for menu {menu_id}");
    }

    let items = menu_items::list_items_for_menu(pool, menu_id).await?;
    let item_names: Vec<String> = items.into_iter().map(|item| item.item_name).collect();
    validate_order_form(form, &item_names)?;

    insert_order_with_details(pool, menu_id, form).await
}

/// Persist an already-validated form: order row plus its positive-quantity
/// lines, in one transaction.
pub async fn insert_order_with_details(
    pool: &PgPool,
    menu_id: Uuid,
    form: &OrderForm,
) -> Result<(Order, Vec<OrderDetail>)> {
    let customer_name = form.customer_name.trim();
    let remarks = form
        .remarks
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());

    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (menu_id, customer_name, remarks) \
         VALUES ($1, $2, $3) \
         RETURNING *",
    )
    .bind(menu_id)
    .bind(customer_name)
    .bind(remarks)
    .fetch_one(&mut *tx)
    .await
    .context("failed to insert order")?;

    let mut details = Vec::new();
    for line in form.lines.iter().filter(|line| line.quantity > 0) {
        let detail = sqlx::query_as::<_, OrderDetail>(
            "INSERT INTO order_details (order_id, item_name, quantity) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(order.id)
        .bind(&line.item_name)
        .bind(line.quantity)
        .fetch_one(&mut *tx)
        .await
        .with_context(|| format!("failed to insert order line {:?}", line.item_name))?;

        details.push(detail);
    }

    tx.commit().await.context("failed to commit transaction")?;

    info!(order_id = %order.id, lines = details.len(), "order submitted");
    Ok((order, details))
}
