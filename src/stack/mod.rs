//! # Stack Navigation
//!
//! A navigation stack of components keyed by configuration values.
//!
//! ```text
//!   StackNavigator::push / pop / ...        (navigation.rs)
//!              │  transform(&[C]) -> Vec<C>
//!              ▼
//!   StackRouter ── owns the current snapshot, serialises calls
//!              │
//!              ▼
//!   StackController ── plan() then apply side effects
//!              │
//!              ▼
//!   StackSnapshot { active: CreatedEntry, back_stack: [Entry] }
//! ```
//!
//! Every live entry owns a [`ComponentContext`]: its lifecycle, state keeper,
//! instance keeper and back handler. Exactly one entry is resumed at a time.
//! Back-stack entries are either stopped (`Created`) or destroyed
//! placeholders that keep only their saved state.

pub mod back_handler;
pub mod context;
pub mod controller;
pub mod entry;
pub mod error;
pub mod instance_keeper;
pub mod lifecycle;
pub mod navigation;
pub mod plan;
pub mod router;
pub mod snapshot;
pub mod state_keeper;

pub use back_handler::{BackCallback, BackDispatcher};
pub use context::{ComponentContext, ComponentFactory, FactoryError};
pub use controller::StackController;
pub use entry::{CreatedEntry, Entry};
pub use error::NavigationError;
pub use instance_keeper::{InstanceKeeper, RetainedInstance};
pub use lifecycle::{LifecycleCallbacks, LifecycleRegistry, LifecycleState, Subscription};
pub use navigation::StackNavigator;
pub use plan::{ActiveResolution, BackSlot, NavigationPlan, PlanOutcome};
pub use router::{ObserverId, SavedEntry, SavedStack, StackRouter};
pub use snapshot::StackSnapshot;
pub use state_keeper::{SavedState, StateKeeper, StateKeeperError};
