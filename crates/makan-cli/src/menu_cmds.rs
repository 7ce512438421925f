//! Operator CLI handlers for `makan menu` subcommands.
//!
//! Implements:
//! - `makan menu create`  -- store a menu extracted from a pasted message
//! - `makan menu parse`   -- preview extraction without storing anything
//! - `makan menu show`    -- show one menu, or list all menus
//! - `makan menu close` / `reopen` / `delete`

use std::io::Read;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;

use makan_core::menu::{create_menu_from_text, extract_menu_items, menu_overview};
use makan_db::queries::{menus, orders};

use crate::MenuCommands;
use crate::resolve::resolve_menu_id;

// -----------------------------------------------------------------------
// Public entry point
// -----------------------------------------------------------------------

/// Dispatch a `MenuCommands` variant to the appropriate handler.
pub async fn run_menu_command(command: MenuCommands, pool: &PgPool) -> Result<()> {
    match command {
        MenuCommands::Create { date, closed, file } => {
            cmd_create(pool, date, closed, file.as_deref()).await
        }
        MenuCommands::Parse { file } => cmd_parse(file.as_deref()),
        MenuCommands::Show { menu } => match menu {
            Some(menu) => cmd_show_one(pool, &menu).await,
            None => cmd_show_all(pool).await,
        },
        MenuCommands::Close { menu } => cmd_set_closed(pool, &menu, true).await,
        MenuCommands::Reopen { menu } => cmd_set_closed(pool, &menu, false).await,
        MenuCommands::Delete { menu } => cmd_delete(pool, &menu).await,
    }
}

/// Read the pasted chat message from a file, or from stdin when no file is
/// given.
fn read_message(file: Option<&str>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read menu file: {path}")),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read menu text from stdin")?;
            Ok(buf)
        }
    }
}

// -----------------------------------------------------------------------
// makan menu create
// -----------------------------------------------------------------------

/// Extract items from the pasted message and store the menu.
async fn cmd_create(
    pool: &PgPool,
    date: Option<NaiveDate>,
    closed: bool,
    file: Option<&str>,
) -> Result<()> {
    // 1. Read the message.
    let raw_text = read_message(file)?;
    if raw_text.trim().is_empty() {
        anyhow::bail!("menu text is empty; paste the chat message on stdin or pass --file");
    }

    // 2. Default the date to today.
    let menu_date = date.unwrap_or_else(|| chrono::Local::now().date_naive());

    // 3. Extract and insert in one transaction.
    let (menu, items) = create_menu_from_text(pool, &raw_text, menu_date, closed).await?;

    // 4. Print summary.
    println!("Menu created.");
    println!();
    println!("  Menu ID: {}", menu.id);
    println!("  Date:    {}", menu.menu_date);
    println!("  Status:  {}", menu.status_label());
    println!("  Items:   {}", items.len());
    println!();
    for item in &items {
        println!("  - {}", item.item_name);
    }
    println!();
    println!("Take orders with `makan order add {} ...` or `makan serve`.", menu.id);

    Ok(())
}

// -----------------------------------------------------------------------
// makan menu parse
// -----------------------------------------------------------------------

/// Preview what the extractor would keep, without touching the database.
pub fn cmd_parse(file: Option<&str>) -> Result<()> {
    let raw_text = read_message(file)?;
    let items = extract_menu_items(&raw_text);

    println!("Extracted {} item(s):", items.len());
    for item in &items {
        println!("  - {item}");
    }

    Ok(())
}

// -----------------------------------------------------------------------
// makan menu show (list all)
// -----------------------------------------------------------------------

/// List all menus, newest date first, with order counts.
async fn cmd_show_all(pool: &PgPool) -> Result<()> {
    let all = menus::list_menus(pool).await?;

    if all.is_empty() {
        println!("No menus found. Use `makan menu create` to create one.");
        return Ok(());
    }

    // ID is always 36 chars (UUID); DATE is always 10.
    let id_w = 36;
    let date_w = 10;
    let status_w = 6;

    println!(
        "{:<id_w$}  {:<date_w$}  {:<status_w$}  {:>6}  CREATED",
        "ID", "DATE", "STATUS", "ORDERS",
    );

    for menu in &all {
        let stats = orders::order_stats_for_menu(pool, menu.id).await?;
        let created = menu.created_at.format("%Y-%m-%d %H:%M");
        println!(
            "{:<id_w$}  {:<date_w$}  {:<status_w$}  {:>6}  {}",
            menu.id.to_string(),
            menu.menu_date.to_string(),
            menu.status_label(),
            stats.total,
            created,
        );
    }

    Ok(())
}

// -----------------------------------------------------------------------
// makan menu show <menu>
// -----------------------------------------------------------------------

/// Show one menu with its items and order counters.
async fn cmd_show_one(pool: &PgPool, menu_arg: &str) -> Result<()> {
    let menu_id = resolve_menu_id(pool, menu_arg).await?;
    let overview = menu_overview(pool, menu_id).await?;

    println!("Menu: {}", overview.menu.menu_date);
    println!("  ID:      {}", overview.menu.id);
    println!("  Status:  {}", overview.menu.status_label());
    println!(
        "  Created: {}",
        overview.menu.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Orders:  {} ({} paid)",
        overview.stats.total, overview.stats.paid
    );
    println!();
    println!("Items:");
    for item in &overview.items {
        println!("  - {}", item.item_name);
    }

    Ok(())
}

// -----------------------------------------------------------------------
// makan menu close / reopen
// -----------------------------------------------------------------------

async fn cmd_set_closed(pool: &PgPool, menu_arg: &str, closed: bool) -> Result<()> {
    let menu_id = resolve_menu_id(pool, menu_arg).await?;
    menus::set_menu_closed(pool, menu_id, closed).await?;

    if closed {
        println!("Menu {menu_id} closed. New orders are refused.");
    } else {
        println!("Menu {menu_id} reopened.");
    }

    Ok(())
}

// -----------------------------------------------------------------------
// makan menu delete
// -----------------------------------------------------------------------

async fn cmd_delete(pool: &PgPool, menu_arg: &str) -> Result<()> {
    let menu_id = resolve_menu_id(pool, menu_arg).await?;
    menus::delete_menu(pool, menu_id).await?;
    println!("Menu {menu_id} deleted.");
    Ok(())
}
