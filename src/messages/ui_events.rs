//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::constants::SWIPE_THRESHOLD;
use crate::models::VoteType;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Vote on the topmost referendum (button, key or swipe)
    Vote(VoteType),

    /// Drop the connection and load everything again
    Reconnect,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, show_help: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('r') => Some(UiEvent::Reconnect),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('y') | KeyCode::Char('a') => {
            Some(UiEvent::Vote(VoteType::Aye))
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('n') | KeyCode::Char('x') => {
            Some(UiEvent::Vote(VoteType::Nay))
        }
        _ => None,
    }
}

/// Turns a left-button drag into a swipe: right is Aye, left is Nay
#[derive(Debug, Default)]
pub struct SwipeTracker {
    origin: Option<u16>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, mouse: MouseEvent) -> Option<UiEvent> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.origin = Some(mouse.column);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let start = self.origin.take()?;
                if mouse.column >= start.saturating_add(SWIPE_THRESHOLD) {
                    Some(UiEvent::Vote(VoteType::Aye))
                } else if mouse.column.saturating_add(SWIPE_THRESHOLD) <= start {
                    Some(UiEvent::Vote(VoteType::Nay))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Columns dragged so far, for the card offset while dragging
    pub fn offset(&self, column: u16) -> i32 {
        self.origin.map(|start| column as i32 - start as i32).unwrap_or(0)
    }

    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }
}
