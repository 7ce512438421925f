//! Menu argument resolution.
//!
//! Commands that take a MENU argument accept either a menu UUID or the
//! literal `latest`, which resolves to the most recently created menu.

use anyhow::{Context, Result, bail};
use sqlx::PgPool;
use uuid::Uuid;

use makan_db::queries::menus;

/// Resolve a MENU command-line argument to a menu UUID.
pub async fn resolve_menu_id(pool: &PgPool, input: &str) -> Result<Uuid> {
    if input.eq_ignore_ascii_case("latest") {
        match menus::latest_menu(pool).await? {
            Some(menu) => Ok(menu.id),
            None => bail!("no menus exist yet; create one with `makan menu create`"),
        }
    } else {
        Uuid::parse_str(input)
            .with_context(|| format!("invalid menu {input:?} (expected a UUID or \"latest\")"))
    }
}

/// Parse an ORDER_ID command-line argument.
pub fn parse_order_id(input: &str) -> Result<Uuid> {
    Uuid::parse_str(input).with_context(|| format!("invalid order ID: {input:?}"))
}
