use anyhow::Context;
use sqlx::PgPool;

use makan_core::menu::menu_export;

use crate::resolve::resolve_menu_id;

/// Export one menu with its items, orders, and stats as pretty JSON.
pub async fn run_export(pool: &PgPool, menu_arg: &str, output: Option<&str>) -> anyhow::Result<()> {
    use std::io::Write;

    let menu_id = resolve_menu_id(pool, menu_arg).await?;
    let export = menu_export(pool, menu_id).await?;

    let json = serde_json::to_string_pretty(&export).context("failed to serialize menu")?;

    let mut writer: Box<dyn Write> = if let Some(path) = output {
        Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("cannot create output file: {path}"))?,
        )
    } else {
        Box::new(std::io::stdout().lock())
    };

    writeln!(writer, "{json}")?;

    if let Some(path) = output {
        println!(
            "Exported menu {} ({} orders) to {path}",
            export.menu.id,
            export.orders.len()
        );
    }

    Ok(())
}
