//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex, Once};

use trellis::platform::ClipboardError;
use trellis::prelude::*;

/// Host calls seen by a [`RecordingHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Capture,
    Release,
    Composition(Rect),
    ReadClipboard,
    WriteClipboard(String),
}

#[derive(Debug, Default)]
pub struct HostState {
    pub calls: Vec<HostCall>,
    pub clipboard: Option<String>,
}

/// Host double that records every call and keeps an in-memory clipboard.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub state: Rc<RefCell<HostState>>,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<HostCall> {
        self.state.borrow().calls.clone()
    }

    pub fn captured(&self) -> bool {
        let state = self.state.borrow();
        let last = state
            .calls
            .iter()
            .rev()
            .find(|c| matches!(c, HostCall::Capture | HostCall::Release));
        last == Some(&HostCall::Capture)
    }
}

impl GridHost for RecordingHost {
    fn capture_pointer(&mut self) {
        self.state.borrow_mut().calls.push(HostCall::Capture);
    }

    fn release_pointer(&mut self) {
        self.state.borrow_mut().calls.push(HostCall::Release);
    }

    fn set_composition_window(&mut self, rect: Rect) {
        self.state.borrow_mut().calls.push(HostCall::Composition(rect));
    }

    fn clipboard_text(&mut self) -> Result<String, ClipboardError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(HostCall::ReadClipboard);
        state.clipboard.clone().ok_or(ClipboardError::Unavailable)
    }

    fn set_clipboard_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(HostCall::WriteClipboard(text.to_owned()));
        state.clipboard = Some(text.to_owned());
        Ok(())
    }
}

/// Install a test subscriber once. Filter with `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Collect every emission of a signal.
pub fn record<T: Clone + Send + 'static>(signal: &Signal<T>) -> Arc<Mutex<Vec<T>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    signal.connect(move |args: &T| sink.lock().unwrap().push(args.clone()));
    seen
}
