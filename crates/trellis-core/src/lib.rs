//! Core systems for Trellis.
//!
//! This crate provides the pieces every Trellis widget builds on:
//!
//! - **Signal/Slot System**: [`Signal`] notifications widgets expose to host code
//! - **Logging**: tracing targets and span names for log filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let check_changed = Signal::<(usize, usize, bool)>::new();
//! let id = check_changed.connect(|(col, row, checked)| {
//!     println!("cell ({col}, {row}) is now {checked}");
//! });
//!
//! check_changed.emit((1, 2, true));
//! check_changed.disconnect(id);
//! ```

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
