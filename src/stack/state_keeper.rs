//! # State Keeper
//!
//! Components register keyed suppliers; the controller calls [`StateKeeper::save`]
//! when an entry is pushed into the back stack and hands the resulting
//! [`SavedState`] back to the factory when the entry has to be recreated.
//!
//! The blob is opaque to the stack: a map from key to `serde_json::Value`,
//! owned and interpreted by the component that registered the key.

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Opaque saved state of one entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedState {
    values: BTreeMap<String, serde_json::Value>,
}

impl SavedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.values.insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateKeeperError {
    AlreadyRegistered(String),
}

impl fmt::Display for StateKeeperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateKeeperError::AlreadyRegistered(key) => {
                write!(f, "state supplier already registered for key '{key}'")
            }
        }
    }
}

impl std::error::Error for StateKeeperError {}

type Supplier = Rc<dyn Fn() -> serde_json::Value>;

#[derive(Default)]
struct Inner {
    restored: BTreeMap<String, serde_json::Value>,
    suppliers: BTreeMap<String, Supplier>,
}

/// Shared handle to one entry's saved-state registry.
#[derive(Clone, Default)]
pub struct StateKeeper {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for StateKeeper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("StateKeeper")
            .field("restored", &inner.restored.keys().collect::<Vec<_>>())
            .field("suppliers", &inner.suppliers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl StateKeeper {
    /// Creates a keeper seeded with previously saved state, if any.
    pub fn new(saved: Option<SavedState>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                restored: saved.map(|s| s.values).unwrap_or_default(),
                suppliers: BTreeMap::new(),
            })),
        }
    }

    /// Takes the restored value for `key`. Each key can be consumed once.
    pub fn consume<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.inner.borrow_mut().restored.remove(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Dropping saved state for key '{}': {}", key, e);
                None
            }
        }
    }

    /// Registers a supplier invoked on every [`save`](Self::save).
    pub fn register<T, F>(
        &self,
        key: impl Into<String>,
        supplier: F,
    ) -> Result<(), StateKeeperError>
    where
        T: Serialize,
        F: Fn() -> T + 'static,
    {
        let key = key.into();
        let mut inner = self.inner.borrow_mut();
        if inner.suppliers.contains_key(&key) {
            return Err(StateKeeperError::AlreadyRegistered(key));
        }
        let log_key = key.clone();
        inner.suppliers.insert(
            key,
            Rc::new(move || {
                serde_json::to_value(supplier()).unwrap_or_else(|e| {
                    warn!("Failed to serialize state for key '{}': {}", log_key, e);
                    serde_json::Value::Null
                })
            }),
        );
        Ok(())
    }

    pub fn unregister(&self, key: &str) {
        self.inner.borrow_mut().suppliers.remove(key);
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.inner.borrow().suppliers.contains_key(key)
    }

    /// Produces a fresh snapshot from every registered supplier.
    ///
    /// Restored values nobody consumed are carried over unchanged.
    pub fn save(&self) -> SavedState {
        let (mut values, suppliers) = {
            let inner = self.inner.borrow();
            let suppliers: Vec<(String, Supplier)> = inner
                .suppliers
                .iter()
                .map(|(k, s)| (k.clone(), s.clone()))
                .collect();
            (inner.restored.clone(), suppliers)
        };
        for (key, supplier) in suppliers {
            values.insert(key, supplier());
        }
        SavedState { values }
    }
}
