//! # Core Application Logic
//!
//! The navstack sample app: a stack of counter screens driven by the
//! [`crate::stack`] router. It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Screens (components) │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`screens`]: `Screen` configurations and the components built for them
//! - [`state`]: The `App` struct, owner of the stack router
//! - [`action`]: The `Action` enum and `update()`
//! - [`config`]: Layered settings
//! - [`session`]: Saving and restoring the stack between runs

pub mod action;
pub mod config;
pub mod screens;
pub mod session;
pub mod state;
