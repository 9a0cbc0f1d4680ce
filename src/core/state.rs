//! # Application State
//!
//! Core state for the navstack sample. Domain logic only, no TUI types.
//!
//! ```text
//! App
//! ├── router: StackRouter<Screen, Child>  // the navigation stack
//! ├── status_message: String             // status bar text
//! ├── max_depth: usize                   // refuse pushes beyond this
//! └── started_at: DateTime<Local>        // shown in the about screen
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use chrono::{DateTime, Local};
use log::info;

use crate::core::screens::{Child, Screen, create_screen};
use crate::stack::{NavigationError, SavedStack, StackRouter};

pub struct App {
    pub router: StackRouter<Screen, Child>,
    pub status_message: String,
    pub max_depth: usize,
    pub started_at: DateTime<Local>,
}

impl App {
    /// Starts on a single root counter.
    pub fn new(max_depth: usize) -> Result<Self, NavigationError> {
        let router = StackRouter::new(create_screen, vec![Screen::root()])?;
        Ok(Self::with_router(router, max_depth, "Welcome to navstack!"))
    }

    /// Rebuilds the stack from a saved session.
    pub fn restore(saved: SavedStack<Screen>, max_depth: usize) -> Result<Self, NavigationError> {
        let router = StackRouter::restore(create_screen, saved)?;
        let depth = router.configurations().len();
        info!("Restored session with {} screens", depth);
        Ok(Self::with_router(
            router,
            max_depth,
            &format!("Restored {depth} screens from last session"),
        ))
    }

    fn with_router(router: StackRouter<Screen, Child>, max_depth: usize, status: &str) -> Self {
        Self {
            router,
            status_message: status.to_string(),
            max_depth,
            started_at: Local::now(),
        }
    }

    pub fn depth(&self) -> usize {
        self.router.snapshot().len()
    }

    pub fn active_screen(&self) -> Screen {
        self.router.active().configuration
    }

    /// Index for the next counter: one past the highest in the stack.
    /// `None` once the highest index is `u32::MAX`.
    pub fn next_counter_index(&self) -> Option<u32> {
        let highest = self
            .router
            .configurations()
            .iter()
            .filter_map(|screen| match screen {
                Screen::Counter { index } => Some(*index),
                Screen::About => None,
            })
            .max();
        match highest {
            Some(index) => index.checked_add(1),
            None => Some(0),
        }
    }
}
