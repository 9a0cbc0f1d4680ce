//! # Component Context
//!
//! Everything a live entry owns, bundled and handed to the component factory
//! explicitly. There is no ambient registry: a component reaches its
//! lifecycle, saved state, retained instances and back callbacks only through
//! the context it was created with.

use std::fmt;

use super::back_handler::BackDispatcher;
use super::instance_keeper::InstanceKeeper;
use super::lifecycle::LifecycleRegistry;
use super::state_keeper::{SavedState, StateKeeper};

#[derive(Clone, Debug)]
pub struct ComponentContext {
    lifecycle: LifecycleRegistry,
    state_keeper: StateKeeper,
    instance_keeper: InstanceKeeper,
    back_handler: BackDispatcher,
}

impl ComponentContext {
    /// Fresh context: `Initialized` lifecycle, state keeper seeded with
    /// `saved_state`, empty instance keeper, stopped back dispatcher.
    pub fn new(saved_state: Option<SavedState>) -> Self {
        Self {
            lifecycle: LifecycleRegistry::new(),
            state_keeper: StateKeeper::new(saved_state),
            instance_keeper: InstanceKeeper::new(),
            back_handler: BackDispatcher::new(),
        }
    }

    pub fn lifecycle(&self) -> &LifecycleRegistry {
        &self.lifecycle
    }

    pub fn state_keeper(&self) -> &StateKeeper {
        &self.state_keeper
    }

    pub fn instance_keeper(&self) -> &InstanceKeeper {
        &self.instance_keeper
    }

    pub fn back_handler(&self) -> &BackDispatcher {
        &self.back_handler
    }
}

/// Failure reported by a [`ComponentFactory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryError(pub String);

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component factory failed: {}", self.0)
    }
}

impl std::error::Error for FactoryError {}

/// Creates live component instances for configurations.
///
/// Must be deterministic for a given configuration and saved state (the saved
/// state is reachable through `context.state_keeper()`).
pub trait ComponentFactory<C, T> {
    fn create(&self, configuration: &C, context: ComponentContext) -> Result<T, FactoryError>;
}

impl<C, T, F> ComponentFactory<C, T> for F
where
    F: Fn(&C, ComponentContext) -> Result<T, FactoryError>,
{
    fn create(&self, configuration: &C, context: ComponentContext) -> Result<T, FactoryError> {
        self(configuration, context)
    }
}
