//! # Back Handler
//!
//! Back-navigation interception. Each entry owns a [`BackDispatcher`]; only
//! the active entry's dispatcher is started, so at most one entry can
//! intercept a back press at any time.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A single back interceptor registered by a component.
pub struct BackCallback {
    enabled: Cell<bool>,
    on_back: Box<dyn Fn(&BackCallback)>,
}

impl BackCallback {
    pub fn new(enabled: bool, on_back: impl Fn(&BackCallback) + 'static) -> Rc<Self> {
        Rc::new(Self {
            enabled: Cell::new(enabled),
            on_back: Box::new(on_back),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }
}

type StartedListener = Rc<dyn Fn(bool)>;

#[derive(Default)]
struct Inner {
    callbacks: Vec<Rc<BackCallback>>,
    listeners: Vec<StartedListener>,
    started: bool,
}

/// Shared handle to one entry's back callbacks.
#[derive(Clone, Default)]
pub struct BackDispatcher {
    inner: Rc<RefCell<Inner>>,
}

impl std::fmt::Debug for BackDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("BackDispatcher")
            .field("callbacks", &inner.callbacks.len())
            .field("started", &inner.started)
            .finish()
    }
}

impl BackDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, callback: Rc<BackCallback>) {
        self.inner.borrow_mut().callbacks.push(callback);
    }

    pub fn unregister(&self, callback: &Rc<BackCallback>) {
        self.inner
            .borrow_mut()
            .callbacks
            .retain(|cb| !Rc::ptr_eq(cb, callback));
    }

    pub fn is_registered(&self, callback: &Rc<BackCallback>) -> bool {
        self.inner
            .borrow()
            .callbacks
            .iter()
            .any(|cb| Rc::ptr_eq(cb, callback))
    }

    /// Calls `listener` whenever the dispatcher is started or stopped.
    /// Repeated `start`/`stop` calls that change nothing are not reported.
    pub fn on_started_changed(&self, listener: impl Fn(bool) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    pub fn start(&self) {
        self.set_started(true);
    }

    pub fn stop(&self) {
        self.set_started(false);
    }

    fn set_started(&self, started: bool) {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            if inner.started == started {
                return;
            }
            inner.started = started;
            inner.listeners.clone()
        };
        for listener in listeners {
            listener(started);
        }
    }

    pub fn is_started(&self) -> bool {
        self.inner.borrow().started
    }

    /// True when started and at least one callback is enabled.
    pub fn is_enabled(&self) -> bool {
        let inner = self.inner.borrow();
        inner.started && inner.callbacks.iter().any(|cb| cb.is_enabled())
    }

    /// Offers a back press to the most recently registered enabled callback.
    pub fn handle_back(&self) -> bool {
        let callback = {
            let inner = self.inner.borrow();
            if !inner.started {
                return false;
            }
            inner.callbacks.iter().rev().find(|cb| cb.is_enabled()).cloned()
        };
        match callback {
            Some(cb) => {
                (cb.on_back)(cb.as_ref());
                true
            }
            None => false,
        }
    }
}
