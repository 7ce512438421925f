//! `makan summary` command: print the chat-ready order summary.

use anyhow::Result;
use sqlx::PgPool;

use makan_core::summary::render_menu_summary;

use crate::clipboard::copy_to_clipboard;
use crate::resolve::resolve_menu_id;

/// Render and print the summary for a menu. With `copy`, also place it on
/// the clipboard; when that fails the printed text is the fallback.
pub async fn run_summary(pool: &PgPool, menu_arg: &str, copy: bool) -> Result<()> {
    let menu_id = resolve_menu_id(pool, menu_arg).await?;
    let summary = render_menu_summary(pool, menu_id).await?;

    println!("{summary}");

    if copy {
        if copy_to_clipboard(&summary) {
            eprintln!("Copied to clipboard.");
        } else {
            eprintln!("Could not copy to clipboard; copy the text above manually.");
        }
    }

    Ok(())
}
