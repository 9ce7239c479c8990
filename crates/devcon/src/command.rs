//! Console-facing command surface.
//!
//! The external dispatcher parses arguments and flags; what reaches the
//! console is one of these already-resolved requests.

use std::path::PathBuf;

/// A resolved console command from the external dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Clear the scrollback (and its link spans and selection).
    Clear,
    /// Toggle console visibility.
    Toggle,
    /// Dump the scrollback as plain text to a file.
    Dump {
        /// Destination file.
        path: PathBuf,
    },
    /// Open public chat entry.
    MessageMode,
    /// Open team chat entry.
    MessageMode2,
}
