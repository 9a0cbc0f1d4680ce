//! # Stack Controller
//!
//! The effectful half of navigation. Given the current snapshot and a
//! transform over its configurations, the controller asks [`plan`] what has to
//! change and then performs exactly those side effects:
//!
//! 1. Resolve the new active entry (reuse, restore through the factory, or
//!    create). This is the only fallible step and runs before anything is
//!    mutated, so a factory error leaves the old snapshot intact.
//! 2. Hand the active slot over: old back handler stops, new one starts, old
//!    pauses, new resumes, old stops. The incoming entry intercepts back
//!    presses before the outgoing one lets go.
//! 3. Destroy the old active entry if its configuration is gone.
//! 4. Build the new back stack, capturing the old active's state if it was
//!    pushed down.
//! 5. Destroy back-stack entries whose configuration is gone.

use log::debug;
use std::fmt::Debug;
use std::rc::Rc;

use super::context::{ComponentContext, ComponentFactory};
use super::entry::{CreatedEntry, Entry};
use super::error::NavigationError;
use super::plan::{ActiveResolution, BackSlot, NavigationPlan, PlanOutcome, plan, validate};
use super::snapshot::StackSnapshot;
use super::state_keeper::SavedState;

pub struct StackController<C, T> {
    factory: Box<dyn ComponentFactory<C, T>>,
}

impl<C, T> StackController<C, T>
where
    C: Clone + PartialEq + Debug,
{
    pub fn new(factory: impl ComponentFactory<C, T> + 'static) -> Self {
        Self {
            factory: Box::new(factory),
        }
    }

    /// Creates a live entry in the `Created` state.
    pub fn create_entry(
        &self,
        configuration: C,
        saved_state: Option<SavedState>,
    ) -> Result<CreatedEntry<C, T>, NavigationError> {
        debug!(
            "Creating entry {:?} (restoring: {})",
            configuration,
            saved_state.is_some()
        );
        let context = ComponentContext::new(saved_state);
        let instance = match self.factory.create(&configuration, context.clone()) {
            Ok(instance) => instance,
            Err(e) => {
                // Anything the factory retained before failing is released here.
                context.instance_keeper().destroy();
                context.lifecycle().destroy();
                return Err(e.into());
            }
        };
        context.lifecycle().create();
        Ok(CreatedEntry::new(configuration, instance, context))
    }

    /// Builds the first snapshot: the last entry is created (from its saved
    /// state, if any) and resumed, the others become destroyed placeholders.
    pub fn initialize(
        &self,
        entries: Vec<(C, Option<SavedState>)>,
    ) -> Result<Rc<StackSnapshot<C, T>>, NavigationError> {
        let configurations: Vec<C> = entries.iter().map(|(c, _)| c.clone()).collect();
        validate(&configurations)?;

        let mut back_stack: Vec<Entry<C, T>> = entries
            .into_iter()
            .map(|(configuration, saved_state)| Entry::Destroyed {
                configuration,
                saved_state,
            })
            .collect();
        let (configuration, saved_state) = match back_stack.pop() {
            Some(Entry::Destroyed {
                configuration,
                saved_state,
            }) => (configuration, saved_state),
            _ => return Err(NavigationError::EmptyStack),
        };

        let active = self.create_entry(configuration, saved_state)?;
        active.back_handler().start();
        active.lifecycle().resume();
        Ok(Rc::new(StackSnapshot::new(active, back_stack)))
    }

    /// Applies `transform` to the configurations of `old` and returns the
    /// resulting snapshot.
    ///
    /// Returns `old` itself (pointer-equal) when the transform changed nothing.
    pub fn navigate<F>(
        &self,
        old: &Rc<StackSnapshot<C, T>>,
        transform: F,
    ) -> Result<Rc<StackSnapshot<C, T>>, NavigationError>
    where
        F: FnOnce(&[C]) -> Vec<C>,
    {
        let configurations = transform(&old.configurations());

        match plan(old, configurations)? {
            PlanOutcome::Unchanged => {
                debug!("Navigation produced the same stack, skipping");
                Ok(old.clone())
            }
            PlanOutcome::Changed(plan) => self.apply(old, plan).map(Rc::new),
        }
    }

    fn apply(
        &self,
        old: &StackSnapshot<C, T>,
        plan: NavigationPlan<C>,
    ) -> Result<StackSnapshot<C, T>, NavigationError> {
        debug!("Applying navigation plan: {:?}", plan.configurations);
        let old_active = old.active();

        let new_active = match plan.active {
            ActiveResolution::Keep => old_active.clone(),
            ActiveResolution::Reuse { index } | ActiveResolution::Restore { index } => {
                self.promote(&old.back_stack()[index])?
            }
            ActiveResolution::Create => {
                self.create_entry(plan.active_configuration().clone(), None)?
            }
        };

        if plan.changes_active() {
            old_active.back_handler().stop();
            new_active.back_handler().start();
            old_active.lifecycle().pause();
            new_active.lifecycle().resume();
            old_active.lifecycle().stop();

            if plan.destroy_old_active {
                debug!("Destroying popped entry {:?}", old_active.configuration);
                old_active.instance_keeper().destroy();
                old_active.lifecycle().destroy();
            }
        }

        let back_stack = plan
            .back_stack
            .iter()
            .zip(&plan.configurations)
            .map(|(slot, configuration)| match *slot {
                BackSlot::PushActive => {
                    let saved = old_active.save_state();
                    Entry::Created(old_active.clone().with_saved_state(Some(saved)))
                }
                BackSlot::Keep { index } => old.back_stack()[index].clone(),
                BackSlot::Placeholder => Entry::Destroyed {
                    configuration: configuration.clone(),
                    saved_state: None,
                },
            })
            .collect();

        for &index in &plan.destroyed {
            old.back_stack()[index].destroy();
        }

        Ok(StackSnapshot::new(new_active, back_stack))
    }

    /// Turns a back-stack entry into an active one.
    fn promote(&self, entry: &Entry<C, T>) -> Result<CreatedEntry<C, T>, NavigationError> {
        match entry {
            Entry::Created(created) => Ok(created.clone().with_saved_state(None)),
            Entry::Destroyed {
                configuration,
                saved_state,
            } => self.create_entry(configuration.clone(), saved_state.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::lifecycle::LifecycleState;
    use crate::test_support::{controller_with, pop, push, start};

    #[test]
    fn test_identity_transform_returns_same_snapshot() {
        let (controller, log) = controller_with(&[]);
        let snapshot = start(&controller, &["a", "b"]);
        log.take();

        let next = controller.navigate(&snapshot, |stack| stack.to_vec()).unwrap();

        assert!(Rc::ptr_eq(&snapshot, &next));
        assert!(log.take().is_empty());
    }

    #[test]
    fn test_initialize_creates_only_the_top() {
        let (controller, log) = controller_with(&[]);
        let snapshot = start(&controller, &["a", "b"]);

        assert_eq!(snapshot.configurations(), vec!["a", "b"]);
        assert!(!snapshot.back_stack()[0].is_created());
        assert_eq!(snapshot.active().lifecycle().state(), LifecycleState::Resumed);
        assert!(snapshot.active().back_handler().is_started());
        assert_eq!(
            log.take(),
            vec![
                "b:factory(fresh)",
                "b:create",
                "b:back-start",
                "b:start",
                "b:resume",
            ]
        );
    }

    #[test]
    fn test_initialize_rejects_invalid_stacks() {
        let (controller, _log) = controller_with(&[]);
        assert!(matches!(
            controller.initialize(vec![]),
            Err(NavigationError::EmptyStack)
        ));
        assert!(matches!(
            controller.initialize(vec![("a", None), ("a", None)]),
            Err(NavigationError::DuplicateConfiguration(_))
        ));
    }

    #[test]
    fn test_push_hands_over_in_order() {
        let (controller, log) = controller_with(&[]);
        let snapshot = start(&controller, &["a"]);
        log.take();

        let next = controller.navigate(&snapshot, push("b")).unwrap();

        assert_eq!(
            log.take(),
            vec![
                "b:factory(fresh)",
                "b:create",
                "a:back-stop",
                "b:back-start",
                "a:pause",
                "b:start",
                "b:resume",
                "a:stop",
                "a:save",
            ]
        );
        assert_eq!(next.active().configuration, "b");
        assert!(next.active().saved_state.is_none());
        assert!(!snapshot.active().back_handler().is_started());
        let pushed = next.back_stack()[0].as_created().unwrap();
        assert_eq!(pushed.lifecycle().state(), LifecycleState::Created);
        assert!(pushed.saved_state.is_some());
    }

    #[test]
    fn test_pop_destroys_old_active() {
        let (controller, log) = controller_with(&[]);
        let snapshot = start(&controller, &["a"]);
        let snapshot = controller.navigate(&snapshot, push("b")).unwrap();
        let b = snapshot.active().clone();
        log.take();

        let next = controller.navigate(&snapshot, pop).unwrap();

        assert_eq!(next.active().configuration, "a");
        assert!(next.active().saved_state.is_none());
        assert_eq!(b.lifecycle().state(), LifecycleState::Destroyed);
        assert!(b.instance_keeper().is_destroyed());
        assert_eq!(
            log.take(),
            vec![
                "b:back-stop",
                "a:back-start",
                "b:pause",
                "a:start",
                "a:resume",
                "b:stop",
                "b:retained-destroy",
                "b:destroy",
            ]
        );
    }

    #[test]
    fn test_factory_failure_leaves_old_stack_untouched() {
        let (controller, log) = controller_with(&["boom"]);
        let snapshot = start(&controller, &["a"]);
        log.take();

        let result = controller.navigate(&snapshot, push("boom"));

        assert!(matches!(result, Err(NavigationError::Factory(_))));
        assert_eq!(snapshot.active().lifecycle().state(), LifecycleState::Resumed);
        assert!(snapshot.active().back_handler().is_started());
        // The half-built component never saw a lifecycle event, but what it
        // retained is released.
        assert_eq!(log.take(), vec!["boom:factory(fresh)", "boom:retained-destroy"]);
    }

    #[test]
    fn test_failed_restore_releases_retained_instances() {
        let (controller, log) = controller_with(&["b"]);
        let snapshot = start(&controller, &["a"]);
        let parked = Rc::new(StackSnapshot::new(
            snapshot.active().clone(),
            vec![Entry::Destroyed {
                configuration: "b",
                saved_state: None,
            }],
        ));
        log.take();

        let result = controller.navigate(&parked, |_| vec!["a", "b"]);

        assert!(matches!(result, Err(NavigationError::Factory(_))));
        assert_eq!(log.take(), vec!["b:factory(fresh)", "b:retained-destroy"]);
        assert_eq!(parked.configurations(), vec!["b", "a"]);
    }

    #[test]
    fn test_restore_from_placeholder_uses_saved_state() {
        let (controller, log) = controller_with(&[]);
        let snapshot = start(&controller, &["a"]);
        snapshot.active().instance.value.set(17);
        let snapshot = controller.navigate(&snapshot, push("b")).unwrap();

        // Same stack, but "a" only survives as its saved state.
        let saved = snapshot.back_stack()[0].saved_state().cloned();
        let parked = Rc::new(StackSnapshot::new(
            snapshot.active().clone(),
            vec![Entry::Destroyed {
                configuration: "a",
                saved_state: saved,
            }],
        ));
        log.take();

        let next = controller.navigate(&parked, pop).unwrap();

        assert_eq!(next.active().instance.value.get(), 17);
        assert!(next.active().instance.restored);
        assert_eq!(log.take()[0], "a:factory(restored)");
    }

    #[test]
    fn test_inserted_configuration_is_not_instantiated() {
        let (controller, log) = controller_with(&[]);
        let snapshot = start(&controller, &["a"]);
        log.take();

        let next = controller.navigate(&snapshot, |_| vec!["x", "a"]).unwrap();

        assert_eq!(next.configurations(), vec!["x", "a"]);
        assert!(!next.back_stack()[0].is_created());
        assert!(next.back_stack()[0].saved_state().is_none());
        assert!(log.take().is_empty());
    }

    #[test]
    fn test_removed_back_entry_destroyed_without_handoff() {
        let (controller, log) = controller_with(&[]);
        let snapshot = start(&controller, &["a"]);
        let snapshot = controller.navigate(&snapshot, push("b")).unwrap();
        let snapshot = controller.navigate(&snapshot, push("c")).unwrap();
        log.take();

        let next = controller.navigate(&snapshot, |_| vec!["a", "c"]).unwrap();

        assert_eq!(next.configurations(), vec!["a", "c"]);
        assert_eq!(log.take(), vec!["b:retained-destroy", "b:destroy"]);
    }
}
