//! # TitleBar Component
//!
//! Top status bar: active screen, stack depth and the latest status message.
//!
//! Purely presentational. All data arrives as props:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new("Counter #2".into(), 3, "Opened Counter #2".into());
//! title_bar.render(frame, area);
//! ```
//!
//! The text degrades gracefully: without a status message the trailing
//! separator is dropped.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Label of the active screen
    pub active: String,
    /// Number of entries in the stack, active included
    pub depth: usize,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(active: String, depth: usize, status_message: String) -> Self {
        Self {
            active,
            depth,
            status_message,
        }
    }

    fn text(&self) -> String {
        let base = format!("navstack | {} (depth {})", self.active, self.depth);
        if self.status_message.is_empty() {
            base
        } else {
            format!("{base} | {}", self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
