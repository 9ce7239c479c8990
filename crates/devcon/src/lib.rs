#![forbid(unsafe_code)]

//! Embeddable drop-down developer console.
//!
//! `devcon` ties the host-agnostic text engine (`devcon-core`) and the
//! line-input layer (`devcon-input`) into one owned [`Console`] context:
//! the print pipeline with hotlink registration and session-log
//! write-through, pixel-accurate hover and selection, scrollback
//! browsing, tab completion against a pluggable registry, history, chat
//! entry modes, and plain-text dumping.
//!
//! The embedding application drives the console once per input-dispatch
//! cycle and supplies its platform capabilities through [`ConsoleHost`].
//!
//! ```
//! use devcon::{Console, ConsoleConfig, NullHost};
//!
//! let mut console = Console::new(ConsoleConfig::default());
//! console.toggle();
//! console.print("ready\n");
//! console.draw(&mut NullHost);
//! ```

pub mod command;
pub mod console;
pub mod dump;
pub mod host;
pub mod session_log;

pub use command::ConsoleCommand;
pub use console::{Console, ConsoleConfig, ConsoleMode, Submission, SubmitScope};
pub use host::{ConsoleHost, NullHost, PointerShape};
pub use session_log::SessionLog;

pub use devcon_core::{
    Cell, CellFlags, LinkIndex, LinkSpan, MapMode, Metrics, Offset, ScrollbackBuffer,
    SelectionModel, SelectionOutcome, SelectionPhase,
};
pub use devcon_input::{
    Completion, CompletionSources, EditLine, HistoryRing, MatchEntry, MatchList,
    TabCompletionEngine,
};
