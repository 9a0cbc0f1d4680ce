use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{BackStack, HelpLine, ScreenView, TitleBar};

/// Width of the back-stack panel.
const BACK_STACK_WIDTH: u16 = 32;

pub fn draw_ui(frame: &mut Frame, app: &App) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());
    let [screen_area, stack_area] =
        Layout::horizontal([Min(0), Length(BACK_STACK_WIDTH)]).areas(main_area);

    // One snapshot per frame so every component sees the same stack.
    let snapshot = app.router.snapshot();
    let active = snapshot.active();

    TitleBar::new(
        active.configuration.to_string(),
        snapshot.len(),
        app.status_message.clone(),
    )
    .render(frame, title_area);
    ScreenView::new(active.configuration, &active.instance, app.started_at)
        .render(frame, screen_area);
    BackStack::new(snapshot.back_stack()).render(frame, stack_area);
    HelpLine.render(frame, help_area);
}
