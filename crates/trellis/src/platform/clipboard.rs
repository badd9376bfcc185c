//! System clipboard access.
//!
//! A thin wrapper around `arboard` for plain-text copy and paste.
//!
//! ```ignore
//! use trellis::platform::Clipboard;
//!
//! if let Ok(mut clipboard) = Clipboard::new() {
//!     clipboard.set_text("42").ok();
//! }
//! ```

/// Error type for clipboard operations.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// The platform clipboard reported an error.
    #[error("clipboard error: {0}")]
    Backend(#[from] arboard::Error),

    /// No clipboard is available to this host.
    #[error("clipboard is not available")]
    Unavailable,
}

/// Cross-platform clipboard access.
///
/// Create an instance when needed and drop it after use.
pub struct Clipboard {
    inner: arboard::Clipboard,
}

impl Clipboard {
    /// Open the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard is unavailable or locked by another
    /// process.
    pub fn new() -> Result<Self, ClipboardError> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
        })
    }

    /// Read the clipboard's text content.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard is empty, holds non-text data, or
    /// cannot be accessed.
    pub fn get_text(&mut self) -> Result<String, ClipboardError> {
        self.inner.get_text().map_err(Into::into)
    }

    /// Replace the clipboard content with `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be written.
    pub fn set_text(&mut self, text: impl AsRef<str>) -> Result<(), ClipboardError> {
        self.inner.set_text(text.as_ref()).map_err(Into::into)
    }
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clipboard").finish_non_exhaustive()
    }
}
