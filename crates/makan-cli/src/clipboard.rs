//! Clipboard adapter for `makan summary --copy`.

use tracing::warn;

/// Copy `text` to the system clipboard.
///
/// Clipboard access fails for environment reasons (headless session, no
/// display server), never because of the text itself. Failures are logged
/// and reported as `false` so the caller can tell the user to copy the
/// printed text manually.
pub fn copy_to_clipboard(text: &str) -> bool {
    let mut clipboard = match arboard::Clipboard::new() {
        Ok(clipboard) => clipboard,
        Err(err) => {
            warn!(%err, "clipboard unavailable");
            return false;
        }
    };

    match clipboard.set_text(text.to_owned()) {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, "clipboard copy failed");
            false
        }
    }
}
