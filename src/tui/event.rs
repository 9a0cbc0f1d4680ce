use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};
use std::time::Duration;

use crate::core::action::Action;

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Next,
    Back,
    PopToRoot,
    ShowAbout,
    ToggleInfo,
    Quit,
    ForceQuit, // Ctrl+C
    Resize,
}

impl TuiEvent {
    /// The core action behind this event. `Resize` only needs a redraw.
    pub fn action(self) -> Option<Action> {
        match self {
            TuiEvent::Next => Some(Action::Next),
            TuiEvent::Back => Some(Action::Prev),
            TuiEvent::PopToRoot => Some(Action::PopToRoot),
            TuiEvent::ShowAbout => Some(Action::ShowAbout),
            TuiEvent::ToggleInfo => Some(Action::ToggleInfo),
            TuiEvent::Quit | TuiEvent::ForceQuit => Some(Action::Quit),
            TuiEvent::Resize => None,
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            warn!("Failed to poll terminal events: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(Event::Key(key_event)) => map_key(key_event),
        Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
        Ok(_) => None,
        Err(e) => {
            warn!("Failed to read terminal event: {}", e);
            None
        }
    }
}

/// Key bindings.
pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code, key_event.modifiers
    );
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (_, KeyCode::Char('n') | KeyCode::Right) => Some(TuiEvent::Next),
        (_, KeyCode::Char('p') | KeyCode::Left | KeyCode::Backspace) => Some(TuiEvent::Back),
        (_, KeyCode::Char('r')) => Some(TuiEvent::PopToRoot),
        (_, KeyCode::Char('a')) => Some(TuiEvent::ShowAbout),
        (_, KeyCode::Char('i')) => Some(TuiEvent::ToggleInfo),
        (_, KeyCode::Char('q') | KeyCode::Esc) => Some(TuiEvent::Quit),
        _ => None,
    }
}
