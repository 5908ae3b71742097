#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! Terminal input arrives from crossterm and is converted once, here, into
//! the types the rest of the workspace consumes. Mouse coordinates are
//! 0-indexed.

use bitflags::bitflags;
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// Terminal was resized to the given columns/rows.
    Resize { width: u16, height: u16 },
    /// Periodic tick from the runtime's poll timeout; drives animations
    /// such as loading spinners.
    Tick,
}

impl Event {
    /// Convert a crossterm event, dropping kinds the explorer has no use
    /// for (paste, focus, key release/repeat).
    #[must_use]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) if key.kind == cte::KeyEventKind::Press => {
                convert_key(key).map(Self::Key)
            }
            cte::Event::Mouse(mouse) => convert_mouse(mouse).map(Self::Mouse),
            cte::Event::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check for a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }
}

/// Key codes the explorer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A mouse event at a cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    /// Column, 0-indexed.
    pub x: u16,
    /// Row, 0-indexed.
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a mouse event with no modifiers.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }
}

/// The kind of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Drag(MouseButton),
    /// Pointer moved with no button held; drives hover tracking.
    Moved,
    ScrollUp,
    ScrollDown,
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

fn convert_key(key: cte::KeyEvent) -> Option<KeyEvent> {
    let code = match key.code {
        cte::KeyCode::Char(c) => KeyCode::Char(c),
        cte::KeyCode::Enter => KeyCode::Enter,
        cte::KeyCode::Esc => KeyCode::Escape,
        cte::KeyCode::Backspace => KeyCode::Backspace,
        cte::KeyCode::Tab => KeyCode::Tab,
        cte::KeyCode::BackTab => KeyCode::BackTab,
        cte::KeyCode::Up => KeyCode::Up,
        cte::KeyCode::Down => KeyCode::Down,
        cte::KeyCode::Left => KeyCode::Left,
        cte::KeyCode::Right => KeyCode::Right,
        cte::KeyCode::Home => KeyCode::Home,
        cte::KeyCode::End => KeyCode::End,
        cte::KeyCode::PageUp => KeyCode::PageUp,
        cte::KeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };
    Some(KeyEvent {
        code,
        modifiers: convert_modifiers(key.modifiers),
    })
}

fn convert_mouse(mouse: cte::MouseEvent) -> Option<MouseEvent> {
    let kind = match mouse.kind {
        cte::MouseEventKind::Down(b) => MouseEventKind::Down(convert_button(b)?),
        cte::MouseEventKind::Up(b) => MouseEventKind::Up(convert_button(b)?),
        cte::MouseEventKind::Drag(b) => MouseEventKind::Drag(convert_button(b)?),
        cte::MouseEventKind::Moved => MouseEventKind::Moved,
        cte::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        cte::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        _ => return None,
    };
    Some(MouseEvent {
        kind,
        x: mouse.column,
        y: mouse.row,
        modifiers: convert_modifiers(mouse.modifiers),
    })
}

fn convert_button(button: cte::MouseButton) -> Option<MouseButton> {
    match button {
        cte::MouseButton::Left => Some(MouseButton::Left),
        cte::MouseButton::Right => Some(MouseButton::Right),
        cte::MouseButton::Middle => Some(MouseButton::Middle),
    }
}

fn convert_modifiers(mods: cte::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if mods.contains(cte::KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if mods.contains(cte::KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if mods.contains(cte::KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    out
}
