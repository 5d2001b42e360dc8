//! Best-effort system clipboard access.

use tracing::{debug, warn};

/// Copy `text` to the system clipboard.
///
/// Returns true when the write succeeded. Failures (headless session,
/// unsupported platform) are logged at WARN and otherwise swallowed; there is
/// no feedback contract beyond best effort.
pub fn copy_text(text: &str) -> bool {
    let mut clipboard = match arboard::Clipboard::new() {
        Ok(clipboard) => clipboard,
        Err(e) => {
            warn!(error = %e, "clipboard_unavailable");
            return false;
        }
    };

    match clipboard.set_text(text.to_string()) {
        Ok(()) => {
            debug!(chars = text.len(), "clipboard_copied");
            true
        }
        Err(e) => {
            warn!(error = %e, "clipboard_write_failed");
            false
        }
    }
}
