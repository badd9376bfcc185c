//! Services a widget needs from the window that hosts it.

use tracing::{debug, trace};
use trellis_core::logging::targets;
use trellis_render::Rect;

use crate::platform::{Clipboard, ClipboardError};

/// Host-side services used by interactive widgets.
///
/// Calls are quick and synchronous. Widgets treat clipboard failures as
/// "nothing happened".
pub trait GridHost {
    /// Route all pointer events to the widget until released.
    fn capture_pointer(&mut self);

    /// End a pointer capture.
    fn release_pointer(&mut self);

    /// Place the input-method composition window over `rect`, in screen
    /// coordinates.
    fn set_composition_window(&mut self, rect: Rect);

    /// Read plain text from the clipboard.
    fn clipboard_text(&mut self) -> Result<String, ClipboardError>;

    /// Write plain text to the clipboard.
    fn set_clipboard_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Host backed by the system clipboard.
///
/// Pointer capture and composition placement belong to the windowing layer,
/// so this host only records them. The clipboard is opened on first use.
#[derive(Debug, Default)]
pub struct SystemHost {
    clipboard: Option<Clipboard>,
    pointer_captured: bool,
    composition_rect: Option<Rect>,
}

impl SystemHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pointer is currently captured.
    pub fn is_pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    /// The last composition window position requested.
    pub fn composition_rect(&self) -> Option<Rect> {
        self.composition_rect
    }

    fn clipboard(&mut self) -> Result<&mut Clipboard, ClipboardError> {
        if self.clipboard.is_none() {
            debug!(target: targets::HOST, "opening system clipboard");
            self.clipboard = Some(Clipboard::new()?);
        }
        self.clipboard.as_mut().ok_or(ClipboardError::Unavailable)
    }
}

impl GridHost for SystemHost {
    fn capture_pointer(&mut self) {
        trace!(target: targets::HOST, "pointer captured");
        self.pointer_captured = true;
    }

    fn release_pointer(&mut self) {
        trace!(target: targets::HOST, "pointer released");
        self.pointer_captured = false;
    }

    fn set_composition_window(&mut self, rect: Rect) {
        trace!(target: targets::HOST, ?rect, "composition window placed");
        self.composition_rect = Some(rect);
    }

    fn clipboard_text(&mut self) -> Result<String, ClipboardError> {
        self.clipboard()?.get_text()
    }

    fn set_clipboard_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard()?.set_text(text)
    }
}
