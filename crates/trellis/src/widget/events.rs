//! Input events delivered to widgets.
//!
//! [`InputEvent`] is the closed set of inputs a widget reacts to. The
//! windowing layer translates native messages into these and hands them to
//! the widget's `dispatch` method. Text arrives separately from key presses:
//! [`InputEvent::KeyDown`] carries the key, [`InputEvent::TextInput`] the
//! characters it produced.

use std::path::PathBuf;

use trellis_render::Point;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        alt: false,
        meta: false,
    };

    /// Whether the platform command modifier is held (Ctrl, or Cmd on macOS).
    pub fn command(&self) -> bool {
        self.control || self.meta
    }

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
}

impl MouseButton {
    /// Bit for this button in a held-buttons mask.
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// Keyboard key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab, Space, Escape,

    // Numpad
    NumpadEnter,

    // Unknown/unmapped key
    Unknown(u16),
}

/// An input event for a widget.
///
/// Positions are in widget-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        position: Point,
        button: MouseButton,
        modifiers: KeyboardModifiers,
    },
    PointerMove {
        position: Point,
        /// Held buttons as a mask of [`MouseButton::mask`] bits.
        buttons: u8,
        modifiers: KeyboardModifiers,
    },
    PointerUp {
        position: Point,
        button: MouseButton,
        modifiers: KeyboardModifiers,
    },
    /// Wheel rotation in notches. Positive `delta_y` is away from the user.
    Wheel {
        position: Point,
        delta_x: f32,
        delta_y: f32,
        modifiers: KeyboardModifiers,
    },
    KeyDown {
        key: Key,
        modifiers: KeyboardModifiers,
    },
    KeyUp {
        key: Key,
        modifiers: KeyboardModifiers,
    },
    /// Characters typed on the keyboard.
    TextInput(String),
    /// The final text of an input-method composition.
    CompositionResult(String),
    /// Files dropped onto the widget.
    DropFiles {
        position: Point,
        paths: Vec<PathBuf>,
    },
    /// The widget lost keyboard focus.
    FocusLost,
}

impl InputEvent {
    /// Primary-button press at `(x, y)`.
    pub fn click(x: f32, y: f32) -> Self {
        Self::PointerDown {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Primary-button release at `(x, y)`.
    pub fn release(x: f32, y: f32) -> Self {
        Self::PointerUp {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Pointer motion at `(x, y)` with `buttons` held.
    pub fn motion(x: f32, y: f32, buttons: u8) -> Self {
        Self::PointerMove {
            position: Point::new(x, y),
            buttons,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Key press without modifiers.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Key press with modifiers.
    pub fn key_with(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self::KeyDown { key, modifiers }
    }

    /// Typed text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::TextInput(text.into())
    }

    /// Plain vertical wheel rotation.
    pub fn wheel(delta_y: f32) -> Self {
        Self::Wheel {
            position: Point::ZERO,
            delta_x: 0.0,
            delta_y,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Short name of the event kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PointerDown { .. } => "pointer_down",
            Self::PointerMove { .. } => "pointer_move",
            Self::PointerUp { .. } => "pointer_up",
            Self::Wheel { .. } => "wheel",
            Self::KeyDown { .. } => "key_down",
            Self::KeyUp { .. } => "key_up",
            Self::TextInput(_) => "text_input",
            Self::CompositionResult(_) => "composition_result",
            Self::DropFiles { .. } => "drop_files",
            Self::FocusLost => "focus_lost",
        }
    }
}
