//! # Lifecycle
//!
//! Per-entry lifecycle state machine. Every live stack entry owns exactly one
//! `LifecycleRegistry`; the controller drives it, components observe it.
//!
//! ```text
//!   Initialized ──create──▶ Created ──start──▶ Started ──resume──▶ Resumed
//!                              │  ◀───stop────    │   ◀───pause────
//!                           destroy
//!                              ▼
//!                          Destroyed (terminal)
//! ```
//!
//! The compound helpers (`resume()`, `stop()`, `destroy()`, ...) walk through
//! every intermediate state so observers always see a complete sequence.

use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;

/// Lifecycle states, ordered from dead to fully active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleState {
    Destroyed,
    Initialized,
    Created,
    Started,
    Resumed,
}

impl LifecycleState {
    pub fn label(self) -> &'static str {
        match self {
            LifecycleState::Destroyed => "destroyed",
            LifecycleState::Initialized => "initialized",
            LifecycleState::Created => "created",
            LifecycleState::Started => "started",
            LifecycleState::Resumed => "resumed",
        }
    }
}

/// Observer of lifecycle transitions. All methods default to no-ops.
pub trait LifecycleCallbacks {
    fn on_create(&self) {}
    fn on_start(&self) {}
    fn on_resume(&self) {}
    fn on_pause(&self) {}
    fn on_stop(&self) {}
    fn on_destroy(&self) {}
}

/// Handle returned by [`LifecycleRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

#[derive(Clone, Copy)]
enum Event {
    Create,
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
}

impl Event {
    fn transition(self) -> (LifecycleState, LifecycleState) {
        use LifecycleState::*;
        match self {
            Event::Create => (Initialized, Created),
            Event::Start => (Created, Started),
            Event::Resume => (Started, Resumed),
            Event::Pause => (Resumed, Started),
            Event::Stop => (Started, Created),
            Event::Destroy => (Created, Destroyed),
        }
    }

    fn is_forward(self) -> bool {
        matches!(self, Event::Create | Event::Start | Event::Resume)
    }

    fn dispatch(self, callbacks: &dyn LifecycleCallbacks) {
        match self {
            Event::Create => callbacks.on_create(),
            Event::Start => callbacks.on_start(),
            Event::Resume => callbacks.on_resume(),
            Event::Pause => callbacks.on_pause(),
            Event::Stop => callbacks.on_stop(),
            Event::Destroy => callbacks.on_destroy(),
        }
    }
}

struct Inner {
    state: LifecycleState,
    observers: Vec<(Subscription, Rc<dyn LifecycleCallbacks>)>,
    next_id: u64,
}

/// Shared handle to one lifecycle state machine.
///
/// Cloning the handle does not clone the state: all clones observe and drive
/// the same registry.
#[derive(Clone)]
pub struct LifecycleRegistry {
    inner: Rc<RefCell<Inner>>,
}

impl Default for LifecycleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LifecycleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleRegistry")
            .field("state", &self.state())
            .finish()
    }
}

impl LifecycleRegistry {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                state: LifecycleState::Initialized,
                observers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.inner.borrow().state
    }

    /// Registers an observer and replays the forward callbacks that lead to
    /// the current state (a late subscriber to a resumed registry receives
    /// `on_create`, `on_start`, `on_resume`).
    pub fn subscribe(&self, callbacks: Rc<dyn LifecycleCallbacks>) -> Subscription {
        let (id, state) = {
            let mut inner = self.inner.borrow_mut();
            let id = Subscription(inner.next_id);
            inner.next_id += 1;
            inner.observers.push((id, callbacks.clone()));
            (id, inner.state)
        };

        if state >= LifecycleState::Created {
            callbacks.on_create();
        }
        if state >= LifecycleState::Started {
            callbacks.on_start();
        }
        if state >= LifecycleState::Resumed {
            callbacks.on_resume();
        }
        id
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.inner
            .borrow_mut()
            .observers
            .retain(|(id, _)| *id != subscription);
    }

    // ── Single-step transitions ─────────────────────────────────────────────

    pub fn on_create(&self) {
        self.step(Event::Create);
    }

    pub fn on_start(&self) {
        self.step(Event::Start);
    }

    pub fn on_resume(&self) {
        self.step(Event::Resume);
    }

    pub fn on_pause(&self) {
        self.step(Event::Pause);
    }

    pub fn on_stop(&self) {
        self.step(Event::Stop);
    }

    pub fn on_destroy(&self) {
        self.step(Event::Destroy);
    }

    // ── Compound transitions ────────────────────────────────────────────────

    /// Moves to `Created` if still `Initialized`.
    pub fn create(&self) {
        if self.state() == LifecycleState::Initialized {
            self.step(Event::Create);
        }
    }

    /// Moves forward to at least `Started`.
    pub fn start(&self) {
        self.create();
        if self.state() == LifecycleState::Created {
            self.step(Event::Start);
        }
    }

    /// Moves forward to `Resumed`.
    pub fn resume(&self) {
        self.start();
        if self.state() == LifecycleState::Started {
            self.step(Event::Resume);
        }
    }

    /// Moves back to at most `Started`.
    pub fn pause(&self) {
        if self.state() == LifecycleState::Resumed {
            self.step(Event::Pause);
        }
    }

    /// Moves back to at most `Created`.
    pub fn stop(&self) {
        self.pause();
        if self.state() == LifecycleState::Started {
            self.step(Event::Stop);
        }
    }

    /// Moves to `Destroyed`. A registry that was never created is marked
    /// destroyed without notifying observers. Destroying twice is a no-op.
    pub fn destroy(&self) {
        self.stop();
        match self.state() {
            LifecycleState::Created => self.step(Event::Destroy),
            LifecycleState::Initialized => {
                self.inner.borrow_mut().state = LifecycleState::Destroyed;
            }
            _ => {}
        }
    }

    fn step(&self, event: Event) {
        let (from, to) = event.transition();
        let observers = {
            let mut inner = self.inner.borrow_mut();
            if inner.state != from {
                warn!(
                    "Ignoring lifecycle transition {} -> {} from state {}",
                    from.label(),
                    to.label(),
                    inner.state.label()
                );
                return;
            }
            inner.state = to;
            inner
                .observers
                .iter()
                .map(|(_, cb)| cb.clone())
                .collect::<Vec<_>>()
        };
        debug!("Lifecycle {} -> {}", from.label(), to.label());

        if event.is_forward() {
            for cb in &observers {
                event.dispatch(cb.as_ref());
            }
        } else {
            for cb in observers.iter().rev() {
                event.dispatch(cb.as_ref());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Recorder {
        fn push(&self, event: &str) {
            self.log.borrow_mut().push(format!("{}:{}", self.name, event));
        }
    }

    impl LifecycleCallbacks for Recorder {
        fn on_create(&self) {
            self.push("create");
        }
        fn on_start(&self) {
            self.push("start");
        }
        fn on_resume(&self) {
            self.push("resume");
        }
        fn on_pause(&self) {
            self.push("pause");
        }
        fn on_stop(&self) {
            self.push("stop");
        }
        fn on_destroy(&self) {
            self.push("destroy");
        }
    }

    fn recorder(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Rc<Recorder> {
        Rc::new(Recorder {
            name,
            log: log.clone(),
        })
    }

    #[test]
    fn test_new_registry_is_initialized() {
        assert_eq!(LifecycleRegistry::new().state(), LifecycleState::Initialized);
    }

    #[test]
    fn test_resume_walks_through_every_state() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = LifecycleRegistry::new();
        registry.subscribe(recorder("a", &log));

        registry.resume();

        assert_eq!(registry.state(), LifecycleState::Resumed);
        assert_eq!(*log.borrow(), vec!["a:create", "a:start", "a:resume"]);
    }

    #[test]
    fn test_destroy_from_resumed_walks_back_down() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = LifecycleRegistry::new();
        registry.resume();
        registry.subscribe(recorder("a", &log));
        log.borrow_mut().clear();

        registry.destroy();

        assert_eq!(registry.state(), LifecycleState::Destroyed);
        assert_eq!(*log.borrow(), vec!["a:pause", "a:stop", "a:destroy"]);
    }

    #[test]
    fn test_destroy_twice_is_noop() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = LifecycleRegistry::new();
        registry.create();
        registry.subscribe(recorder("a", &log));
        registry.destroy();
        registry.destroy();

        assert_eq!(*log.borrow(), vec!["a:create", "a:destroy"]);
    }

    #[test]
    fn test_destroy_uncreated_registry_skips_callbacks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = LifecycleRegistry::new();
        registry.subscribe(recorder("a", &log));

        registry.destroy();

        assert_eq!(registry.state(), LifecycleState::Destroyed);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_late_subscriber_receives_replay() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = LifecycleRegistry::new();
        registry.start();

        registry.subscribe(recorder("late", &log));

        assert_eq!(*log.borrow(), vec!["late:create", "late:start"]);
    }

    #[test]
    fn test_backward_events_notify_in_reverse_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = LifecycleRegistry::new();
        registry.subscribe(recorder("a", &log));
        registry.subscribe(recorder("b", &log));
        registry.resume();
        log.borrow_mut().clear();

        registry.pause();

        assert_eq!(*log.borrow(), vec!["b:pause", "a:pause"]);
    }

    #[test]
    fn test_illegal_single_step_is_ignored() {
        let registry = LifecycleRegistry::new();
        registry.on_resume();
        assert_eq!(registry.state(), LifecycleState::Initialized);
    }

    #[test]
    fn test_destroyed_registry_cannot_be_revived() {
        let registry = LifecycleRegistry::new();
        registry.resume();
        registry.destroy();
        registry.resume();
        assert_eq!(registry.state(), LifecycleState::Destroyed);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = LifecycleRegistry::new();
        let sub = registry.subscribe(recorder("a", &log));
        registry.unsubscribe(sub);

        registry.resume();

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let registry = LifecycleRegistry::new();
        let handle = registry.clone();
        handle.start();
        assert_eq!(registry.state(), LifecycleState::Started);
    }
}
