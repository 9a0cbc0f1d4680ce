//! # Navigation Plan
//!
//! The pure half of navigation: compares the current snapshot with the
//! configuration list a transform produced and decides, per slot, what the
//! controller has to do. Nothing here touches a lifecycle or a factory.

use std::fmt::Debug;

use super::entry::Entry;
use super::error::NavigationError;
use super::snapshot::StackSnapshot;

/// How the new active entry is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveResolution {
    /// Same configuration as before; the old active entry stays.
    Keep,
    /// Live entry at this back-stack index becomes active, saved state cleared.
    Reuse { index: usize },
    /// Destroyed placeholder at this back-stack index is recreated from its
    /// saved state.
    Restore { index: usize },
    /// Never seen before; created from scratch.
    Create,
}

/// Where each new back-stack entry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackSlot {
    /// The old active entry, pushed down with its state captured.
    PushActive,
    /// Old back-stack entry at this index, reused as-is.
    Keep { index: usize },
    /// New destroyed placeholder without saved state.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationPlan<C> {
    /// New configurations bottom-to-top, active last.
    pub configurations: Vec<C>,
    pub active: ActiveResolution,
    /// One slot per configuration except the active one.
    pub back_stack: Vec<BackSlot>,
    /// The old active configuration is gone from the new list.
    pub destroy_old_active: bool,
    /// Old back-stack indices whose configuration is gone from the new list.
    pub destroyed: Vec<usize>,
}

impl<C> NavigationPlan<C> {
    pub fn active_configuration(&self) -> &C {
        // `plan` never builds a plan from an empty list
        &self.configurations[self.configurations.len() - 1]
    }

    pub fn changes_active(&self) -> bool {
        self.active != ActiveResolution::Keep
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome<C> {
    /// The transform returned the current stack; nothing to do.
    Unchanged,
    Changed(NavigationPlan<C>),
}

/// Rejects empty lists and lists with repeated configurations.
pub fn validate<C: PartialEq + Debug>(configurations: &[C]) -> Result<(), NavigationError> {
    if configurations.is_empty() {
        return Err(NavigationError::EmptyStack);
    }
    for (i, c) in configurations.iter().enumerate() {
        if configurations[..i].contains(c) {
            return Err(NavigationError::DuplicateConfiguration(format!("{c:?}")));
        }
    }
    Ok(())
}

/// Computes the plan that turns `old` into `configurations`.
pub fn plan<C, T>(
    old: &StackSnapshot<C, T>,
    configurations: Vec<C>,
) -> Result<PlanOutcome<C>, NavigationError>
where
    C: Clone + PartialEq + Debug,
{
    if configurations == old.configurations() {
        return Ok(PlanOutcome::Unchanged);
    }

    validate(&configurations)?;

    let (new_active, rest) = match configurations.split_last() {
        Some(split) => split,
        None => return Err(NavigationError::EmptyStack),
    };
    let old_active = &old.active().configuration;

    let active = if new_active == old_active {
        ActiveResolution::Keep
    } else {
        match old.position(new_active) {
            Some(index) => match &old.back_stack()[index] {
                Entry::Created(_) => ActiveResolution::Reuse { index },
                Entry::Destroyed { .. } => ActiveResolution::Restore { index },
            },
            None => ActiveResolution::Create,
        }
    };

    let back_stack = rest
        .iter()
        .map(|c| {
            if c == old_active {
                BackSlot::PushActive
            } else {
                match old.position(c) {
                    Some(index) => BackSlot::Keep { index },
                    None => BackSlot::Placeholder,
                }
            }
        })
        .collect();

    let destroy_old_active = active != ActiveResolution::Keep && !rest.contains(old_active);

    let destroyed = old
        .back_stack()
        .iter()
        .enumerate()
        .filter(|(_, entry)| !configurations.contains(entry.configuration()))
        .map(|(index, _)| index)
        .collect();

    Ok(PlanOutcome::Changed(NavigationPlan {
        configurations,
        active,
        back_stack,
        destroy_old_active,
        destroyed,
    }))
}
