//! # ScreenView Component
//!
//! Renders the active entry: a counter card, or the about text.

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::screens::{AboutComponent, Child, CounterComponent, Screen};
use crate::tui::component::Component;

pub struct ScreenView<'a> {
    pub screen: Screen,
    pub child: &'a Child,
    /// When the app started, shown on the about screen.
    pub started_at: DateTime<Local>,
}

impl<'a> ScreenView<'a> {
    pub fn new(screen: Screen, child: &'a Child, started_at: DateTime<Local>) -> Self {
        Self {
            screen,
            child,
            started_at,
        }
    }
}

impl Component for ScreenView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(self.screen.to_string())
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.child {
            Child::Counter(counter) => render_counter(frame, inner, counter),
            Child::About(about) => render_about(frame, inner, about, self.started_at),
        }
    }
}

fn render_counter(frame: &mut Frame, area: Rect, counter: &CounterComponent) {
    use Constraint::{Length, Min};

    let info_height = if counter.is_info_open() { 6 } else { 0 };
    let [card_area, info_area] = Layout::vertical([Min(0), Length(info_height)]).areas(area);

    let origin = if counter.is_restored() {
        "restored"
    } else {
        "fresh"
    };
    let card = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            counter.count().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{} ticks since created, {} count",
            counter.session_ticks(),
            origin
        )),
        Line::from(Span::styled(
            format!("lifecycle: {}", counter.lifecycle_state().label()),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(card, card_area);

    if counter.is_info_open() {
        let info = Paragraph::new(
            "The count is saved state: it survives this screen being destroyed \
             and the app restarting. Ticks live in a retained instance and reset \
             once the screen is destroyed. Press back to close this panel.",
        )
        .block(Block::bordered().title("info"))
        .wrap(Wrap { trim: true });
        frame.render_widget(info, info_area);
    }
}

fn render_about(
    frame: &mut Frame,
    area: Rect,
    about: &AboutComponent,
    started_at: DateTime<Local>,
) {
    let text = Paragraph::new(vec![
        Line::from("navstack: a component navigation stack demo"),
        Line::from(""),
        Line::from(format!("started {}", started_at.format("%H:%M:%S"))),
        Line::from(format!("screen opened {}", about.opened_at.format("%H:%M:%S"))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(text, area);
}
