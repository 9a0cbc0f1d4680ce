//! # Screens
//!
//! The sample app's configurations and the components built for them.
//!
//! ```text
//! Screen::Counter { index }  →  Child::Counter(CounterComponent)
//! Screen::About              →  Child::About(AboutComponent)
//! ```
//!
//! A counter keeps two numbers on purpose. `count` goes through the state
//! keeper, so it survives the entry being dropped to a placeholder and even
//! a restart. `ticks` lives in a retained `CounterTicker`, so it survives
//! being pushed down the stack but starts over once the entry is destroyed.

use chrono::{DateTime, Local};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::stack::{
    BackCallback, ComponentContext, FactoryError, LifecycleCallbacks, LifecycleRegistry,
    LifecycleState, RetainedInstance,
};

/// State keeper key for the counter value.
pub const COUNTER_KEY: &str = "counter";
const TICKER_KEY: &str = "ticker";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Counter { index: u32 },
    About,
}

impl Screen {
    pub fn root() -> Self {
        Screen::Counter { index: 0 }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Counter { index } => write!(f, "Counter #{index}"),
            Screen::About => write!(f, "About"),
        }
    }
}

/// A live screen component.
pub enum Child {
    Counter(CounterComponent),
    About(AboutComponent),
}

/// Per-entry tick counter kept in the instance keeper.
#[derive(Debug, Default)]
pub struct CounterTicker {
    ticks: Cell<u64>,
}

impl CounterTicker {
    pub fn ticks(&self) -> u64 {
        self.ticks.get()
    }

    fn advance(&self) {
        self.ticks.set(self.ticks.get() + 1);
    }
}

impl RetainedInstance for CounterTicker {
    fn on_destroy(&self) {
        debug!("Counter ticker released after {} ticks", self.ticks.get());
    }
}

/// Logs every transition of one screen.
struct LifecycleLogger {
    screen: Screen,
}

impl LifecycleLogger {
    fn log(&self, event: &str) {
        debug!("{} {}", self.screen, event);
    }
}

impl LifecycleCallbacks for LifecycleLogger {
    fn on_create(&self) {
        self.log("created");
    }
    fn on_start(&self) {
        self.log("started");
    }
    fn on_resume(&self) {
        self.log("resumed");
    }
    fn on_pause(&self) {
        self.log("paused");
    }
    fn on_stop(&self) {
        self.log("stopped");
    }
    fn on_destroy(&self) {
        self.log("destroyed");
    }
}

pub struct CounterComponent {
    pub index: u32,
    count: Rc<Cell<u64>>,
    ticker: Rc<CounterTicker>,
    lifecycle: LifecycleRegistry,
    info_open: Rc<Cell<bool>>,
    close_info: Rc<BackCallback>,
    restored: bool,
}

impl CounterComponent {
    pub fn new(index: u32, context: &ComponentContext) -> Result<Self, FactoryError> {
        let saved = context.state_keeper().consume::<u64>(COUNTER_KEY);
        let restored = saved.is_some();
        let count = Rc::new(Cell::new(saved.unwrap_or(0)));

        let supplied = count.clone();
        context
            .state_keeper()
            .register(COUNTER_KEY, move || supplied.get())
            .map_err(|e| FactoryError(e.to_string()))?;

        let ticker = context
            .instance_keeper()
            .get_or_create(TICKER_KEY, CounterTicker::default);

        // The info panel swallows the first back press by closing itself.
        let info_open = Rc::new(Cell::new(false));
        let open = info_open.clone();
        let close_info = BackCallback::new(false, move |callback| {
            open.set(false);
            callback.set_enabled(false);
        });
        context.back_handler().register(close_info.clone());

        context.lifecycle().subscribe(Rc::new(LifecycleLogger {
            screen: Screen::Counter { index },
        }));

        Ok(Self {
            index,
            count,
            ticker,
            lifecycle: context.lifecycle().clone(),
            info_open,
            close_info,
            restored,
        })
    }

    pub fn count(&self) -> u64 {
        self.count.get()
    }

    /// Ticks seen since this entry was created.
    pub fn session_ticks(&self) -> u64 {
        self.ticker.ticks()
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Whether the count came from saved state.
    pub fn is_restored(&self) -> bool {
        self.restored
    }

    /// Advances the counter. Only a resumed counter ticks.
    pub fn tick(&self) -> bool {
        if self.lifecycle.state() != LifecycleState::Resumed {
            warn!(
                "Counter #{} ticked while {}",
                self.index,
                self.lifecycle.state().label()
            );
            return false;
        }
        self.count.set(self.count.get() + 1);
        self.ticker.advance();
        true
    }

    pub fn is_info_open(&self) -> bool {
        self.info_open.get()
    }

    pub fn toggle_info(&self) {
        let open = !self.info_open.get();
        self.info_open.set(open);
        self.close_info.set_enabled(open);
    }
}

pub struct AboutComponent {
    pub opened_at: DateTime<Local>,
}

/// Factory handed to the stack router.
pub fn create_screen(screen: &Screen, context: ComponentContext) -> Result<Child, FactoryError> {
    match *screen {
        Screen::Counter { index } => CounterComponent::new(index, &context).map(Child::Counter),
        Screen::About => {
            context
                .lifecycle()
                .subscribe(Rc::new(LifecycleLogger { screen: *screen }));
            Ok(Child::About(AboutComponent {
                opened_at: Local::now(),
            }))
        }
    }
}
