//! # BackStack Component
//!
//! Side panel listing the back stack, top first. Each row shows whether the
//! entry is still live or only a destroyed placeholder, and whether it holds
//! saved state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem};

use crate::core::screens::{Child, Screen};
use crate::stack::Entry;
use crate::tui::component::Component;

pub struct BackStack<'a> {
    pub entries: &'a [Entry<Screen, Child>],
}

impl<'a> BackStack<'a> {
    pub fn new(entries: &'a [Entry<Screen, Child>]) -> Self {
        Self { entries }
    }
}

fn row(entry: &Entry<Screen, Child>) -> ListItem<'static> {
    let (status, status_style) = if entry.is_created() {
        ("live", Style::default().fg(Color::Green))
    } else {
        ("destroyed", Style::default().fg(Color::DarkGray))
    };
    let saved = if entry.saved_state().is_some() {
        " +state"
    } else {
        ""
    };
    ListItem::new(Line::from(vec![
        Span::raw(format!("{:<12}", entry.configuration().to_string())),
        Span::styled(status, status_style),
        Span::styled(saved, Style::default().add_modifier(Modifier::ITALIC)),
    ]))
}

impl Component for BackStack<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().title(format!("back stack ({})", self.entries.len()));
        if self.entries.is_empty() {
            let empty = List::new([ListItem::new(Span::styled(
                "(empty)",
                Style::default().fg(Color::DarkGray),
            ))])
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self.entries.iter().rev().map(row).collect();
        frame.render_widget(List::new(items).block(block), area);
    }
}
