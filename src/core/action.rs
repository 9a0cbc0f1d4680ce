//! # Actions
//!
//! Everything that can happen in navstack becomes an `Action`.
//! User presses `n`? That's `Action::Next`.
//! The tick timer fires? That's `Action::Tick`.
//!
//! `update()` applies an action to the app and returns an `Effect` for the
//! adapter to carry out. Navigation side effects happen inside the stack
//! router; everything outside the process (terminal, disk) happens in the
//! adapter.
//!
//! ```text
//! State + Action  →  update()  →  Effect
//! ```

use log::{debug, warn};

use crate::core::screens::{Child, Screen};
use crate::core::state::App;
use crate::stack::{NavigationError, StackNavigator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Push a new counter.
    Next,
    /// Back press: the active screen may consume it, otherwise pop.
    Prev,
    /// Pop everything above the root.
    PopToRoot,
    /// Bring the about screen to the front.
    ShowAbout,
    /// Open or close the active counter's info panel.
    ToggleInfo,
    /// Timer tick for the active counter.
    Tick,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Something visible changed.
    Redraw,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("Action: {:?}", action);
    match action {
        Action::Next => {
            if app.depth() >= app.max_depth {
                app.status_message = format!("Stack is full ({} screens)", app.max_depth);
                return Effect::Redraw;
            }
            let Some(index) = app.next_counter_index() else {
                app.status_message = "No counter numbers left".to_string();
                return Effect::Redraw;
            };
            let screen = Screen::Counter { index };
            let result = app.router.push(screen);
            report(app, result, format!("Opened {screen}"))
        }
        Action::Prev => match app.router.on_back() {
            Ok(true) => {
                app.status_message = format!("Back to {}", app.active_screen());
                Effect::Redraw
            }
            Ok(false) => {
                app.status_message = "Already at the root".to_string();
                Effect::Redraw
            }
            Err(e) => report(app, Err(e), String::new()),
        },
        Action::PopToRoot => match app.router.pop_to(0) {
            Ok(true) => {
                app.status_message = format!("Back to {}", app.active_screen());
                Effect::Redraw
            }
            Ok(false) => Effect::None,
            Err(e) => report(app, Err(e), String::new()),
        },
        Action::ShowAbout => {
            let result = app.router.bring_to_front(Screen::About);
            report(app, result, "About navstack".to_string())
        }
        Action::ToggleInfo => match &*app.router.active().instance {
            Child::Counter(counter) => {
                counter.toggle_info();
                Effect::Redraw
            }
            Child::About(_) => Effect::None,
        },
        Action::Tick => match &*app.router.active().instance {
            Child::Counter(counter) if counter.tick() => Effect::Redraw,
            _ => Effect::None,
        },
        Action::Quit => Effect::Quit,
    }
}

/// Turns a navigation result into a status line.
fn report(app: &mut App, result: Result<(), NavigationError>, success: String) -> Effect {
    match result {
        Ok(()) => {
            app.status_message = success;
        }
        Err(e) => {
            warn!("Navigation failed: {}", e);
            app.status_message = format!("Navigation failed: {e}");
        }
    }
    Effect::Redraw
}
