//! # Instance Keeper
//!
//! Keyed resources retained for the whole life of an entry, whether it is
//! active or parked in the back stack. They are released exactly once, when
//! the entry is fully destroyed.

use log::{debug, warn};
use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A resource retained by an [`InstanceKeeper`].
pub trait RetainedInstance: 'static {
    /// Called once when the owning entry is destroyed.
    fn on_destroy(&self) {}
}

struct Slot {
    value: Rc<dyn Any>,
    destroy: Box<dyn Fn()>,
}

impl Slot {
    fn new<T: RetainedInstance>(instance: Rc<T>) -> Self {
        let retained = instance.clone();
        Self {
            value: instance,
            destroy: Box::new(move || retained.on_destroy()),
        }
    }
}

#[derive(Default)]
struct Inner {
    slots: BTreeMap<String, Slot>,
    destroyed: bool,
}

/// Shared handle to one entry's retained resources.
#[derive(Clone, Default)]
pub struct InstanceKeeper {
    inner: Rc<RefCell<Inner>>,
}

impl std::fmt::Debug for InstanceKeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("InstanceKeeper")
            .field("keys", &inner.slots.keys().collect::<Vec<_>>())
            .field("destroyed", &inner.destroyed)
            .finish()
    }
}

impl InstanceKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: RetainedInstance>(&self, key: &str) -> Option<Rc<T>> {
        let value = self.inner.borrow().slots.get(key)?.value.clone();
        value.downcast::<T>().ok()
    }

    /// Returns the instance stored under `key`, creating it when missing.
    ///
    /// An existing instance of a different type is destroyed and replaced.
    /// After [`destroy`](Self::destroy) the new instance is returned but not
    /// retained.
    pub fn get_or_create<T, F>(&self, key: &str, create: F) -> Rc<T>
    where
        T: RetainedInstance,
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.get::<T>(key) {
            return existing;
        }

        let instance = Rc::new(create());

        let replaced = {
            let mut inner = self.inner.borrow_mut();
            if inner.destroyed {
                warn!("Instance keeper already destroyed, not retaining '{}'", key);
                return instance;
            }
            inner
                .slots
                .insert(key.to_string(), Slot::new(instance.clone()))
        };
        if let Some(old) = replaced {
            warn!("Replacing retained instance '{}' of a different type", key);
            (old.destroy)();
        }
        instance
    }

    /// Removes the instance without calling `on_destroy`.
    pub fn remove(&self, key: &str) -> bool {
        self.inner.borrow_mut().slots.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.borrow().destroyed
    }

    /// Destroys every retained instance. Idempotent.
    pub fn destroy(&self) {
        let slots = {
            let mut inner = self.inner.borrow_mut();
            if inner.destroyed {
                return;
            }
            inner.destroyed = true;
            std::mem::take(&mut inner.slots)
        };
        debug!("Destroying {} retained instance(s)", slots.len());
        for slot in slots.values() {
            (slot.destroy)();
        }
    }
}
