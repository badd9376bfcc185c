//! Non-owning image references.
//!
//! Widgets never own pixel data. They hold an [`ImageHandle`], a key into an
//! image store that lives with the application, and hand the key to the
//! [`Renderer`](crate::Renderer) at draw time. A handle whose image has been
//! removed from the store simply draws nothing.

use slotmap::{SlotMap, new_key_type};

use crate::types::Size;

new_key_type! {
    /// Key identifying an image in an [`ImageStore`].
    pub struct ImageHandle;
}

/// Metadata the store keeps for each registered image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    /// Human-readable name, usually the source path.
    pub name: String,
    /// Natural size of the image in pixels.
    pub size: Size,
}

/// A simple application-side registry of images.
///
/// Decoding and GPU upload belong to the rendering backend; the store only
/// allocates stable keys.
#[derive(Debug, Default)]
pub struct ImageStore {
    entries: SlotMap<ImageHandle, ImageEntry>,
}

impl ImageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image and return its handle.
    pub fn insert(&mut self, name: impl Into<String>, size: Size) -> ImageHandle {
        self.entries.insert(ImageEntry {
            name: name.into(),
            size,
        })
    }

    /// Remove an image. Outstanding handles become stale.
    pub fn remove(&mut self, handle: ImageHandle) -> Option<ImageEntry> {
        self.entries.remove(handle)
    }

    /// Look up an image's metadata.
    pub fn get(&self, handle: ImageHandle) -> Option<&ImageEntry> {
        self.entries.get(handle)
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_handle_after_remove() {
        let mut store = ImageStore::new();
        let handle = store.insert("icon.png", Size::new(16.0, 16.0));
        assert_eq!(store.get(handle).map(|e| e.size), Some(Size::new(16.0, 16.0)));

        store.remove(handle);
        assert!(store.get(handle).is_none());
        assert!(store.is_empty());
    }
}
