//! # Stack Entries
//!
//! One slot of the stack: either a live component with its context, or a
//! destroyed placeholder that only remembers its configuration and the last
//! saved state.

use log::debug;
use std::fmt;
use std::rc::Rc;

use super::back_handler::BackDispatcher;
use super::context::ComponentContext;
use super::instance_keeper::InstanceKeeper;
use super::lifecycle::{LifecycleRegistry, LifecycleState};
use super::state_keeper::{SavedState, StateKeeper};

/// A live entry.
///
/// `saved_state` is only populated while the entry sits in the back stack.
pub struct CreatedEntry<C, T> {
    pub configuration: C,
    pub instance: Rc<T>,
    pub saved_state: Option<SavedState>,
    context: ComponentContext,
}

impl<C: Clone, T> Clone for CreatedEntry<C, T> {
    fn clone(&self) -> Self {
        Self {
            configuration: self.configuration.clone(),
            instance: self.instance.clone(),
            saved_state: self.saved_state.clone(),
            context: self.context.clone(),
        }
    }
}

impl<C: fmt::Debug, T> fmt::Debug for CreatedEntry<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatedEntry")
            .field("configuration", &self.configuration)
            .field("lifecycle", &self.lifecycle().state())
            .field("saved_state", &self.saved_state)
            .finish()
    }
}

impl<C, T> CreatedEntry<C, T> {
    pub fn new(configuration: C, instance: T, context: ComponentContext) -> Self {
        Self {
            configuration,
            instance: Rc::new(instance),
            saved_state: None,
            context,
        }
    }

    pub fn context(&self) -> &ComponentContext {
        &self.context
    }

    pub fn lifecycle(&self) -> &LifecycleRegistry {
        self.context.lifecycle()
    }

    pub fn state_keeper(&self) -> &StateKeeper {
        self.context.state_keeper()
    }

    pub fn instance_keeper(&self) -> &InstanceKeeper {
        self.context.instance_keeper()
    }

    pub fn back_handler(&self) -> &BackDispatcher {
        self.context.back_handler()
    }

    /// Same entry with its saved-state slot replaced.
    pub fn with_saved_state(mut self, saved_state: Option<SavedState>) -> Self {
        self.saved_state = saved_state;
        self
    }

    /// Asks the component for a fresh snapshot of its state.
    pub fn save_state(&self) -> SavedState {
        self.context.state_keeper().save()
    }

    /// Stops the entry, releases retained instances, then destroys the
    /// lifecycle. Idempotent.
    pub fn destroy(&self) {
        if self.lifecycle().state() == LifecycleState::Destroyed {
            return;
        }
        self.context.back_handler().stop();
        self.context.lifecycle().stop();
        self.context.instance_keeper().destroy();
        self.context.lifecycle().destroy();
    }
}

/// One stack slot.
pub enum Entry<C, T> {
    Created(CreatedEntry<C, T>),
    Destroyed {
        configuration: C,
        saved_state: Option<SavedState>,
    },
}

impl<C: Clone, T> Clone for Entry<C, T> {
    fn clone(&self) -> Self {
        match self {
            Entry::Created(entry) => Entry::Created(entry.clone()),
            Entry::Destroyed {
                configuration,
                saved_state,
            } => Entry::Destroyed {
                configuration: configuration.clone(),
                saved_state: saved_state.clone(),
            },
        }
    }
}

impl<C: fmt::Debug, T> fmt::Debug for Entry<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Created(entry) => entry.fmt(f),
            Entry::Destroyed {
                configuration,
                saved_state,
            } => f
                .debug_struct("Destroyed")
                .field("configuration", configuration)
                .field("saved_state", saved_state)
                .finish(),
        }
    }
}

impl<C: fmt::Debug, T> Entry<C, T> {
    pub fn configuration(&self) -> &C {
        match self {
            Entry::Created(entry) => &entry.configuration,
            Entry::Destroyed { configuration, .. } => configuration,
        }
    }

    pub fn saved_state(&self) -> Option<&SavedState> {
        match self {
            Entry::Created(entry) => entry.saved_state.as_ref(),
            Entry::Destroyed { saved_state, .. } => saved_state.as_ref(),
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Entry::Created(_))
    }

    pub fn as_created(&self) -> Option<&CreatedEntry<C, T>> {
        match self {
            Entry::Created(entry) => Some(entry),
            Entry::Destroyed { .. } => None,
        }
    }

    pub fn instance(&self) -> Option<&Rc<T>> {
        self.as_created().map(|entry| &entry.instance)
    }

    /// Fully destroys a live entry; placeholders hold nothing to release.
    pub fn destroy(&self) {
        if let Entry::Created(entry) = self {
            debug!("Destroying entry {:?}", entry.configuration);
            entry.destroy();
        }
    }
}
