//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The loop sleeps in `poll` until either a key arrives or the next counter
//! tick is due, so an idle app wakes up once per `tick_ms`. A frame is drawn
//! only when an effect asked for it or the terminal was resized.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::session;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), Hide)?;
        info!("Terminal modes enabled (hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

pub fn run(config: ResolvedConfig, session_dir: Option<PathBuf>) -> std::io::Result<()> {
    let mut app = session::open_app(
        session_dir.as_deref(),
        config.restore_session,
        config.max_depth,
    )?;

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();

    let tick = Duration::from_millis(config.tick_ms);
    let mut next_tick = Instant::now() + tick;
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app))?;
            needs_redraw = false;
        }

        let timeout = next_tick.saturating_duration_since(Instant::now());
        let first_event = poll_event_timeout(timeout);

        let mut actions: Vec<Action> = Vec::new();
        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if event == TuiEvent::Resize {
                needs_redraw = true;
            }
            actions.extend(event.action());
        }
        if Instant::now() >= next_tick {
            actions.push(Action::Tick);
            next_tick = Instant::now() + tick;
        }

        for action in actions {
            match update(&mut app, action) {
                Effect::Quit => break 'main,
                Effect::Redraw => needs_redraw = true,
                Effect::None => {}
            }
        }
    }

    debug!("Leaving with stack {:?}", app.router.configurations());
    session::save_current_session(&app, session_dir.as_deref());
    app.router.destroy();

    drop(terminal_mode_guard);
    ratatui::restore();
    Ok(())
}
