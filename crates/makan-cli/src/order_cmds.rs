//! Operator CLI handlers for `makan order` subcommands.
//!
//! Implements:
//! - `makan order add`    -- submit an order against a menu
//! - `makan order list`   -- list a menu's orders in submission order
//! - `makan order paid`   -- toggle an order's paid flag
//! - `makan order delete` -- delete an order

use anyhow::{Context, Result};
use sqlx::PgPool;

use makan_core::order::{OrderForm, OrderLine, submit_order};
use makan_core::summary::load_summary_entries;
use makan_db::queries::{menus, orders};

use crate::OrderCommands;
use crate::resolve::{parse_order_id, resolve_menu_id};

// -----------------------------------------------------------------------
// Public entry point
// -----------------------------------------------------------------------

/// Dispatch an `OrderCommands` variant to the appropriate handler.
pub async fn run_order_command(command: OrderCommands, pool: &PgPool) -> Result<()> {
    match command {
        OrderCommands::Add {
            menu,
            name,
            items,
            remarks,
        } => cmd_add(pool, &menu, &name, &items, remarks).await,
        OrderCommands::List { menu } => cmd_list(pool, &menu).await,
        OrderCommands::Paid { order_id, unpaid } => cmd_paid(pool, &order_id, !unpaid).await,
        OrderCommands::Delete { order_id } => cmd_delete(pool, &order_id).await,
    }
}

/// Parse an `--item` argument of the form `NAME=QTY`, or bare `NAME`
/// (quantity 1).
fn parse_item_spec(spec: &str) -> Result<OrderLine> {
    let (name, quantity) = match spec.split_once('=') {
        Some((name, qty)) => {
            let quantity: i32 = qty
                .trim()
                .parse()
                .with_context(|| format!("invalid quantity in --item {spec:?}"))?;
            (name, quantity)
        }
        None => (spec, 1),
    };

    Ok(OrderLine {
        item_name: name.trim().to_string(),
        quantity,
    })
}

// -----------------------------------------------------------------------
// makan order add
// -----------------------------------------------------------------------

async fn cmd_add(
    pool: &PgPool,
    menu_arg: &str,
    name: &str,
    item_specs: &[String],
    remarks: Option<String>,
) -> Result<()> {
    let menu_id = resolve_menu_id(pool, menu_arg).await?;

    let lines = item_specs
        .iter()
        .map(|spec| parse_item_spec(spec))
        .collect::<Result<Vec<_>>>()?;

    let form = OrderForm {
        customer_name: name.to_string(),
        lines,
        remarks,
    };

    let (order, details) = submit_order(pool, menu_id, &form).await?;

    println!("Order added.");
    println!();
    println!("  Order ID: {}", order.id);
    println!("  Customer: {}", order.customer_name);
    for detail in &details {
        println!("  - {} × {}", detail.item_name, detail.quantity);
    }
    if let Some(remarks) = order.remarks.as_deref() {
        println!("  Remarks:  {remarks}");
    }

    Ok(())
}

// -----------------------------------------------------------------------
// makan order list
// -----------------------------------------------------------------------

async fn cmd_list(pool: &PgPool, menu_arg: &str) -> Result<()> {
    let menu_id = resolve_menu_id(pool, menu_arg).await?;
    let menu = menus::get_menu(pool, menu_id)
        .await?
        .with_context(|| format!("menu {menu_id} not found"))?;

    let entries = load_summary_entries(pool, menu_id).await?;
    if entries.is_empty() {
        println!("No orders yet for {}.", menu.menu_date);
        return Ok(());
    }

    let stats = orders::order_stats_for_menu(pool, menu_id).await?;
    println!(
        "{} order(s) for {} ({} paid):",
        stats.total, menu.menu_date, stats.paid
    );
    println!();

    for (index, entry) in entries.iter().enumerate() {
        let paid = if entry.order.is_paid { " [paid]" } else { "" };
        println!(
            "{}. {} ({}){paid}",
            index + 1,
            entry.order.customer_name,
            entry.order.id
        );
        for detail in &entry.details {
            println!("   - {} × {}", detail.item_name, detail.quantity);
        }
        if let Some(remarks) = entry.order.remarks.as_deref() {
            println!("   remarks: {remarks}");
        }
    }

    Ok(())
}

// -----------------------------------------------------------------------
// makan order paid / delete
// -----------------------------------------------------------------------

async fn cmd_paid(pool: &PgPool, order_arg: &str, is_paid: bool) -> Result<()> {
    let order_id = parse_order_id(order_arg)?;
    orders::set_order_paid(pool, order_id, is_paid).await?;

    if is_paid {
        println!("Order {order_id} marked paid.");
    } else {
        println!("Order {order_id} marked unpaid.");
    }

    Ok(())
}

async fn cmd_delete(pool: &PgPool, order_arg: &str) -> Result<()> {
    let order_id = parse_order_id(order_arg)?;
    orders::delete_order(pool, order_id).await?;
    println!("Order {order_id} deleted.");
    Ok(())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
