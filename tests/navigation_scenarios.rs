//! End-to-end navigation scenarios through the public router API.
//!
//! Every component records its lifecycle callbacks in a shared journal so
//! the tests can assert the exact order of side effects.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use navstack::stack::{
    ComponentContext, Entry, FactoryError, LifecycleCallbacks, LifecycleState, NavigationError,
    StackNavigator, StackRouter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
enum Page {
    A,
    B,
    C,
}

type Journal = Rc<RefCell<Vec<String>>>;

struct Recorder {
    page: Page,
    journal: Journal,
}

impl Recorder {
    fn note(&self, event: &str) {
        self.journal.borrow_mut().push(format!("{:?}:{}", self.page, event));
    }
}

impl LifecycleCallbacks for Recorder {
    fn on_create(&self) {
        self.note("create");
    }
    fn on_start(&self) {
        self.note("start");
    }
    fn on_resume(&self) {
        self.note("resume");
    }
    fn on_pause(&self) {
        self.note("pause");
    }
    fn on_stop(&self) {
        self.note("stop");
    }
    fn on_destroy(&self) {
        self.note("destroy");
    }
}

struct PageComponent {
    visits: Rc<Cell<u32>>,
}

/// Counts how often each page was instantiated, across saves and restores,
/// and journals when each page gains or loses back-press focus.
fn page_factory(
    journal: Journal,
) -> impl Fn(&Page, ComponentContext) -> Result<PageComponent, FactoryError> {
    move |page, context| {
        let visits = Rc::new(Cell::new(
            context.state_keeper().consume::<u32>("visits").unwrap_or(0) + 1,
        ));
        let supplied = visits.clone();
        context
            .state_keeper()
            .register("visits", move || supplied.get())
            .map_err(|e| FactoryError(e.to_string()))?;
        context.lifecycle().subscribe(Rc::new(Recorder {
            page: *page,
            journal: journal.clone(),
        }));
        let (page, back_journal) = (*page, journal.clone());
        context.back_handler().on_started_changed(move |started| {
            let event = if started { "back-start" } else { "back-stop" };
            back_journal.borrow_mut().push(format!("{page:?}:{event}"));
        });
        Ok(PageComponent { visits })
    }
}

fn router_on(initial: Vec<Page>) -> (StackRouter<Page, PageComponent>, Journal) {
    let journal: Journal = Rc::default();
    let router = StackRouter::new(page_factory(journal.clone()), initial).unwrap();
    (router, journal)
}

fn drain(journal: &Journal) -> Vec<String> {
    std::mem::take(&mut *journal.borrow_mut())
}

#[test]
fn test_pop_to_root_destroys_everything_above() {
    let (router, journal) = router_on(vec![Page::A]);
    router.push(Page::B).unwrap();
    router.push(Page::C).unwrap();
    drain(&journal);

    router.replace_all(vec![Page::A]).unwrap();

    assert_eq!(router.configurations(), vec![Page::A]);
    assert_eq!(
        drain(&journal),
        vec![
            "C:back-stop",
            "A:back-start",
            "C:pause",
            "A:start",
            "A:resume",
            "C:stop",
            "C:destroy",
            "B:destroy",
        ]
    );
    assert_eq!(router.active().lifecycle().state(), LifecycleState::Resumed);
}

#[test]
fn test_push_stops_previous_and_keeps_it_alive() {
    let (router, journal) = router_on(vec![Page::A]);
    drain(&journal);

    router.push(Page::B).unwrap();

    let snapshot = router.snapshot();
    assert_eq!(snapshot.configurations(), vec![Page::A, Page::B]);
    let a = snapshot.back_stack()[0].as_created().unwrap();
    assert_eq!(a.lifecycle().state(), LifecycleState::Created);
    assert!(a.saved_state.is_some());
    assert_eq!(
        drain(&journal),
        vec![
            "B:create",
            "A:back-stop",
            "B:back-start",
            "A:pause",
            "B:start",
            "B:resume",
            "A:stop",
        ]
    );
}

#[test]
fn test_swap_reuses_both_entries() {
    let (router, journal) = router_on(vec![Page::A]);
    router.push(Page::B).unwrap();
    let a_before = router.snapshot().back_stack()[0].instance().cloned().unwrap();
    drain(&journal);

    router.navigate(|stack| stack.iter().rev().copied().collect()).unwrap();

    let snapshot = router.snapshot();
    assert_eq!(snapshot.configurations(), vec![Page::B, Page::A]);
    assert!(Rc::ptr_eq(&a_before, &snapshot.active().instance));
    assert!(snapshot.back_stack()[0].is_created());
    assert_eq!(
        drain(&journal),
        vec![
            "B:back-stop",
            "A:back-start",
            "B:pause",
            "A:start",
            "A:resume",
            "B:stop",
        ]
    );
}

#[test]
fn test_same_stack_is_a_no_op() {
    let (router, journal) = router_on(vec![Page::A, Page::B]);
    let before = router.snapshot();
    drain(&journal);

    router.navigate(|stack| stack.to_vec()).unwrap();
    router.push_new(Page::B).unwrap();

    assert!(Rc::ptr_eq(&before, &router.snapshot()));
    assert!(drain(&journal).is_empty());
}

#[test]
fn test_invalid_transforms_leave_stack_untouched() {
    let (router, journal) = router_on(vec![Page::A, Page::B]);
    let before = router.snapshot();
    drain(&journal);

    assert_eq!(router.replace_all(vec![]), Err(NavigationError::EmptyStack));
    assert!(matches!(
        router.push(Page::A),
        Err(NavigationError::DuplicateConfiguration(_))
    ));

    assert!(Rc::ptr_eq(&before, &router.snapshot()));
    assert!(drain(&journal).is_empty());
}

#[test]
fn test_destroyed_entry_comes_back_with_saved_state() {
    // Only the top of an initial stack is instantiated.
    let (router, journal) = router_on(vec![Page::A, Page::B]);
    assert!(matches!(router.snapshot().back_stack()[0], Entry::Destroyed { .. }));
    drain(&journal);

    assert_eq!(router.pop(), Ok(true));
    assert_eq!(
        drain(&journal)[..5],
        ["A:create", "B:back-stop", "A:back-start", "B:pause", "A:start"]
    );
    assert_eq!(router.active().instance.visits.get(), 1);
}

#[test]
fn test_saved_stack_survives_serialization() {
    let (router, _journal) = router_on(vec![Page::A]);
    router.push(Page::C).unwrap();
    let json = serde_json::to_string(&router.save_state()).unwrap();
    router.destroy();
    assert!(router.is_destroyed());

    let restored: StackRouter<Page, PageComponent> = StackRouter::restore(
        page_factory(Journal::default()),
        serde_json::from_str(&json).unwrap(),
    )
    .unwrap();

    assert_eq!(restored.configurations(), vec![Page::A, Page::C]);
    assert_eq!(restored.active().instance.visits.get(), 2);
    restored.pop().unwrap();
    assert_eq!(restored.active().instance.visits.get(), 2);
}
