//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::stack::{
    ComponentContext, ComponentFactory, CreatedEntry, Entry, FactoryError, LifecycleCallbacks,
    RetainedInstance, StackController, StackSnapshot,
};

pub type Cfg = &'static str;

/// Ordered record of everything the probes observed.
#[derive(Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.borrow_mut().push(event.into());
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// A component that records its lifecycle and saves a single integer.
pub struct Probe {
    pub name: Cfg,
    pub value: Rc<Cell<i64>>,
    pub restored: bool,
}

struct ProbeCallbacks {
    name: Cfg,
    log: EventLog,
}

impl ProbeCallbacks {
    fn push(&self, event: &str) {
        self.log.push(format!("{}:{}", self.name, event));
    }
}

impl LifecycleCallbacks for ProbeCallbacks {
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

struct ProbeRetained {
    name: Cfg,
    log: EventLog,
}

impl RetainedInstance for ProbeRetained {
    fn on_destroy(&self) {
        self.log.push(format!("{}:retained-destroy", self.name));
    }
}

/// Factory double: creates probes, fails for configurations in `fail_on`.
///
/// A failing configuration still populates its context first, so failures
/// exercise the cleanup of a half-built component.
#[derive(Clone, Default)]
pub struct ProbeFactory {
    pub fail_on: Vec<Cfg>,
    pub log: EventLog,
}

impl ComponentFactory<Cfg, Probe> for ProbeFactory {
    fn create(
        &self,
        configuration: &Cfg,
        context: ComponentContext,
    ) -> Result<Probe, FactoryError> {
        let name = *configuration;
        let saved = context.state_keeper().consume::<i64>("value");
        self.log.push(format!(
            "{}:factory({})",
            name,
            if saved.is_some() { "restored" } else { "fresh" }
        ));

        let value = Rc::new(Cell::new(saved.unwrap_or(0)));
        let supplied = value.clone();
        let log = self.log.clone();
        context
            .state_keeper()
            .register("value", move || {
                log.push(format!("{name}:save"));
                supplied.get()
            })
            .map_err(|e| FactoryError(e.to_string()))?;

        context.lifecycle().subscribe(Rc::new(ProbeCallbacks {
            name,
            log: self.log.clone(),
        }));
        let log = self.log.clone();
        context.back_handler().on_started_changed(move |started| {
            let event = if started { "back-start" } else { "back-stop" };
            log.push(format!("{name}:{event}"));
        });
        context.instance_keeper().get_or_create("probe", || ProbeRetained {
            name,
            log: self.log.clone(),
        });

        if self.fail_on.contains(&name) {
            return Err(FactoryError(format!("cannot create {name}")));
        }

        Ok(Probe {
            name,
            value,
            restored: saved.is_some(),
        })
    }
}

pub fn controller_with(fail_on: &[Cfg]) -> (StackController<Cfg, Probe>, EventLog) {
    let factory = ProbeFactory {
        fail_on: fail_on.to_vec(),
        log: EventLog::default(),
    };
    let log = factory.log.clone();
    (StackController::new(factory), log)
}

pub fn start(
    controller: &StackController<Cfg, Probe>,
    configs: &[Cfg],
) -> Rc<StackSnapshot<Cfg, Probe>> {
    controller
        .initialize(configs.iter().map(|c| (*c, None)).collect())
        .unwrap()
}

/// Snapshot built by hand: the last configuration is active, those listed in
/// `live` are created back-stack entries, the rest are placeholders.
pub fn snapshot_of(configs: &[Cfg], live: &[Cfg]) -> StackSnapshot<Cfg, Probe> {
    let factory = ProbeFactory::default();
    let created = |c: Cfg| {
        let context = ComponentContext::new(None);
        let probe = factory.create(&c, context.clone()).unwrap();
        context.lifecycle().create();
        CreatedEntry::new(c, probe, context)
    };

    let (active, rest) = configs.split_last().unwrap();
    let back_stack = rest
        .iter()
        .map(|c| {
            if live.contains(c) {
                Entry::Created(created(*c))
            } else {
                Entry::Destroyed {
                    configuration: *c,
                    saved_state: None,
                }
            }
        })
        .collect();
    StackSnapshot::new(created(*active), back_stack)
}

pub fn push(configuration: Cfg) -> impl FnOnce(&[Cfg]) -> Vec<Cfg> {
    move |stack| {
        let mut next = stack.to_vec();
        next.push(configuration);
        next
    }
}

pub fn pop(stack: &[Cfg]) -> Vec<Cfg> {
    stack[..stack.len() - 1].to_vec()
}

/// Draws with `draw` on a `width` x `height` test terminal and returns the
/// buffer as one string, row after row.
pub fn render_text(width: u16, height: u16, draw: impl FnOnce(&mut ratatui::Frame)) -> String {
    let backend = ratatui::backend::TestBackend::new(width, height);
    let mut terminal = ratatui::Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}
