//! # Stack Snapshot
//!
//! Navigation state at one instant. Immutable once built: the controller
//! produces a new snapshot for every change and render surfaces only read
//! `active` and `back_stack`.

use std::fmt;

use super::entry::{CreatedEntry, Entry};

pub struct StackSnapshot<C, T> {
    active: CreatedEntry<C, T>,
    back_stack: Vec<Entry<C, T>>,
}

impl<C: fmt::Debug, T> fmt::Debug for StackSnapshot<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackSnapshot")
            .field("active", &self.active)
            .field("back_stack", &self.back_stack)
            .finish()
    }
}

impl<C: Clone + PartialEq + fmt::Debug, T> StackSnapshot<C, T> {
    pub(crate) fn new(active: CreatedEntry<C, T>, back_stack: Vec<Entry<C, T>>) -> Self {
        Self { active, back_stack }
    }

    pub fn active(&self) -> &CreatedEntry<C, T> {
        &self.active
    }

    /// Entries below the active one, bottom first.
    pub fn back_stack(&self) -> &[Entry<C, T>] {
        &self.back_stack
    }

    /// Configurations bottom-to-top, active last.
    pub fn configurations(&self) -> Vec<C> {
        self.back_stack
            .iter()
            .map(|entry| entry.configuration().clone())
            .chain(std::iter::once(self.active.configuration.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.back_stack.len() + 1
    }

    /// Never true: a snapshot always has an active entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, configuration: &C) -> bool {
        self.active.configuration == *configuration || self.find(configuration).is_some()
    }

    /// Position of `configuration` in the back stack.
    pub fn position(&self, configuration: &C) -> Option<usize> {
        self.back_stack
            .iter()
            .position(|entry| entry.configuration() == configuration)
    }

    /// Back-stack entry for `configuration`.
    pub fn find(&self, configuration: &C) -> Option<&Entry<C, T>> {
        self.position(configuration).map(|i| &self.back_stack[i])
    }
}
