//! Platform services.

mod clipboard;

pub use clipboard::{Clipboard, ClipboardError};
