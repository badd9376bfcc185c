//! Widgets and the input vocabulary they share.
//!
//! - [`events`]: keyboard, pointer, wheel, text and drop events
//! - [`host`]: services a widget asks of its window ([`GridHost`])
//! - [`grid`]: the [`GridView`] data grid

pub mod events;
pub mod grid;
pub mod host;

pub use events::{InputEvent, Key, KeyboardModifiers, MouseButton};
pub use grid::{EditSession, GridView, HitTarget, ScrollState, Viewport};
pub use host::{GridHost, SystemHost};
