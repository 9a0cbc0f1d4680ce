//! # Stack Router
//!
//! Owner of the current snapshot. Render surfaces hold a router, read
//! [`StackRouter::snapshot`] and request changes through
//! [`StackNavigator`](super::navigation::StackNavigator). The router
//! serialises navigation: a call that arrives while another one is running
//! (from a lifecycle callback or an observer) is rejected.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::rc::Rc;

use super::context::ComponentFactory;
use super::controller::StackController;
use super::entry::CreatedEntry;
use super::error::NavigationError;
use super::navigation::StackNavigator;
use super::snapshot::StackSnapshot;
use super::state_keeper::SavedState;

/// One persisted slot of a [`SavedStack`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEntry<C> {
    pub configuration: C,
    pub saved_state: Option<SavedState>,
}

/// The whole stack in persistable form, bottom first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedStack<C> {
    pub entries: Vec<SavedEntry<C>>,
}

impl<C> SavedStack<C> {
    pub fn configurations(&self) -> impl Iterator<Item = &C> {
        self.entries.iter().map(|e| &e.configuration)
    }
}

/// Handle returned by [`StackRouter::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(u64);

type Observer<C, T> = Rc<dyn Fn(&StackSnapshot<C, T>)>;

/// Resets the in-progress flag even if a transform or observer panics.
struct NavigationGuard<'a>(&'a Cell<bool>);

impl<'a> NavigationGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Result<Self, NavigationError> {
        if flag.replace(true) {
            return Err(NavigationError::Reentrant);
        }
        Ok(Self(flag))
    }
}

impl Drop for NavigationGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct StackRouter<C, T> {
    controller: StackController<C, T>,
    snapshot: RefCell<Rc<StackSnapshot<C, T>>>,
    navigating: Cell<bool>,
    destroyed: Cell<bool>,
    observers: RefCell<Vec<(ObserverId, Observer<C, T>)>>,
    next_observer: Cell<u64>,
}

impl<C, T> StackRouter<C, T>
where
    C: Clone + PartialEq + Debug,
{
    /// Starts a router on `initial` (bottom first). Only the top entry is
    /// instantiated; the rest are placeholders created on demand.
    pub fn new(
        factory: impl ComponentFactory<C, T> + 'static,
        initial: Vec<C>,
    ) -> Result<Self, NavigationError> {
        let entries = initial.into_iter().map(|c| (c, None)).collect();
        Self::start(StackController::new(factory), entries)
    }

    /// Starts a router from a previously saved stack. The top entry is
    /// recreated from its saved state; the rest keep their saved state until
    /// they are navigated to.
    pub fn restore(
        factory: impl ComponentFactory<C, T> + 'static,
        saved: SavedStack<C>,
    ) -> Result<Self, NavigationError> {
        let entries = saved
            .entries
            .into_iter()
            .map(|e| (e.configuration, e.saved_state))
            .collect();
        Self::start(StackController::new(factory), entries)
    }

    fn start(
        controller: StackController<C, T>,
        entries: Vec<(C, Option<SavedState>)>,
    ) -> Result<Self, NavigationError> {
        let snapshot = controller.initialize(entries)?;
        info!("Stack router started with {:?}", snapshot.configurations());
        Ok(Self {
            controller,
            snapshot: RefCell::new(snapshot),
            navigating: Cell::new(false),
            destroyed: Cell::new(false),
            observers: RefCell::new(Vec::new()),
            next_observer: Cell::new(0),
        })
    }

    pub fn snapshot(&self) -> Rc<StackSnapshot<C, T>> {
        self.snapshot.borrow().clone()
    }

    pub fn active(&self) -> CreatedEntry<C, T> {
        self.snapshot.borrow().active().clone()
    }

    pub fn configurations(&self) -> Vec<C> {
        self.snapshot.borrow().configurations()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// Registers an observer called with every new snapshot.
    pub fn subscribe(&self, observer: impl Fn(&StackSnapshot<C, T>) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer.get());
        self.next_observer.set(id.0 + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: ObserverId) {
        self.observers.borrow_mut().retain(|(oid, _)| *oid != id);
    }

    /// Offers a back press to the active entry, then pops if it was not
    /// handled. Returns whether anything happened.
    pub fn on_back(&self) -> Result<bool, NavigationError> {
        if self.destroyed.get() {
            return Err(NavigationError::Destroyed);
        }
        let active = self.active();
        if active.back_handler().handle_back() {
            debug!("Back press handled by {:?}", active.configuration);
            return Ok(true);
        }
        self.pop()
    }

    /// Persistable form of the current stack. The active entry is asked for
    /// fresh state; back-stack entries contribute what they captured when
    /// they were pushed down.
    pub fn save_state(&self) -> SavedStack<C> {
        let snapshot = self.snapshot();
        let mut entries: Vec<SavedEntry<C>> = snapshot
            .back_stack()
            .iter()
            .map(|entry| SavedEntry {
                configuration: entry.configuration().clone(),
                saved_state: entry.saved_state().cloned(),
            })
            .collect();
        entries.push(SavedEntry {
            configuration: snapshot.active().configuration.clone(),
            saved_state: Some(snapshot.active().save_state()),
        });
        SavedStack { entries }
    }

    /// Destroys every live entry, back stack top-down, then the active one.
    /// Idempotent; later navigation fails with [`NavigationError::Destroyed`].
    pub fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        let snapshot = self.snapshot();
        info!("Destroying stack router ({} entries)", snapshot.len());
        for entry in snapshot.back_stack().iter().rev() {
            entry.destroy();
        }
        snapshot.active().destroy();
        self.observers.borrow_mut().clear();
    }

    fn notify(&self, snapshot: &StackSnapshot<C, T>) {
        let observers: Vec<Observer<C, T>> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, o)| o.clone())
            .collect();
        for observer in observers {
            observer(snapshot);
        }
    }
}

impl<C, T> StackNavigator<C> for StackRouter<C, T>
where
    C: Clone + PartialEq + Debug,
{
    fn navigate<F>(&self, transform: F) -> Result<(), NavigationError>
    where
        F: FnOnce(&[C]) -> Vec<C>,
    {
        if self.destroyed.get() {
            return Err(NavigationError::Destroyed);
        }
        let _guard = NavigationGuard::acquire(&self.navigating)?;

        let old = self.snapshot();
        let new = self.controller.navigate(&old, transform)?;
        if Rc::ptr_eq(&old, &new) {
            return Ok(());
        }

        debug!("Stack is now {:?}", new.configurations());
        *self.snapshot.borrow_mut() = new.clone();
        self.notify(&new);
        Ok(())
    }
}
