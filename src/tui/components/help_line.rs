use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

const BINDINGS: [(&str, &str); 6] = [
    ("n/→", "next"),
    ("p/←", "back"),
    ("r", "root"),
    ("a", "about"),
    ("i", "info"),
    ("q", "quit"),
];

/// Key binding reminder at the bottom of the screen.
pub struct HelpLine;

impl Component for HelpLine {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default().fg(Color::Yellow);
        let spans: Vec<Span> = BINDINGS
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(*key, key_style),
                    Span::raw(format!(" {label}  ")),
                ]
            })
            .collect();
        frame.render_widget(Line::from(spans), area);
    }
}
