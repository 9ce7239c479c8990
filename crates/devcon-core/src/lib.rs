#![forbid(unsafe_code)]

//! Host-agnostic console text engine.
//!
//! This crate owns the data model of an interactive console's output
//! pane: the circular [`ScrollbackBuffer`] over a logically unbounded
//! line stream, the [`LinkIndex`] of clickable spans printed into it, the
//! [`Metrics`] mapping from window pixels to logical [`Offset`]s, and the
//! [`SelectionModel`] that turns pointer input into an offset range.
//!
//! Everything here is synchronous, single-threaded, and total: edge-case
//! input degrades to a documented no-op, never an error. Rendering, input
//! delivery, and command execution live in the embedding layers.

pub mod cell;
pub mod coord;
pub mod links;
pub mod offset;
pub mod scrollback;
pub mod selection;

pub use cell::{Cell, CellFlags};
pub use coord::{MapMode, Metrics};
pub use links::{LinkIndex, LinkSpan};
pub use offset::Offset;
pub use scrollback::ScrollbackBuffer;
pub use selection::{SelectionModel, SelectionOutcome, SelectionPhase, intersect};
