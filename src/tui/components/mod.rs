//! # TUI Components
//!
//! All components are stateless: they receive their data as props and
//! render it. Anything that changes lives in `App`.
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (active screen, depth, status)
//! ├── screen_view.rs  (the active entry)
//! ├── back_stack.rs   (live / destroyed entries below it)
//! └── help_line.rs    (key bindings)
//! ```
//!
//! Props-based data flow keeps dependencies explicit:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! BackStack::new(snapshot.back_stack()).render(frame, area);
//!
//! // Bad: hidden dependency on global state
//! back_stack.render(frame, area); // reads from global App
//! ```

mod back_stack;
mod help_line;
mod screen_view;
mod title_bar;

pub use back_stack::BackStack;
pub use help_line::HelpLine;
pub use screen_view::ScreenView;
pub use title_bar::TitleBar;
