#![forbid(unsafe_code)]

//! Console line input: editing, tab completion, and history.
//!
//! [`EditLine`] is the live input line; [`TabCompletionEngine`] rewrites
//! it from pluggable [`CompletionSources`] with bash-style incremental
//! narrowing and match cycling; [`HistoryRing`] stores submitted lines
//! behind a live edit slot. Candidate lists are transient
//! [`MatchList`]s, naturally sorted and deduplicated.
//!
//! Everything is synchronous and total: empty input, no candidates, or
//! exhausted history all degrade to documented no-ops.

pub mod completion;
pub mod edit_line;
pub mod history;
pub mod matches;
pub mod natural;

pub use completion::{Completion, CompletionSources, SEPARATORS, TabCompletionEngine};
pub use edit_line::EditLine;
pub use history::HistoryRing;
pub use matches::{MatchEntry, MatchList};
pub use natural::{contains_ignore_ascii_case, find_ignore_ascii_case, natural_cmp};
