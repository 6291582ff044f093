use crate::app::state::{App, FILTER_OPTIONS};
use crossterm::event::KeyCode;
use renewables_core::ViewMode;

mod help;
mod list;
mod map;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if handle_global_input(app, key) {
        return;
    }

    match app.store.view_mode() {
        ViewMode::Map => map::handle_map_input(app, key),
        ViewMode::List => list::handle_list_input(app, key),
    }
}

/// Keys that mean the same thing in both views.
fn handle_global_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('m') => app.set_view(ViewMode::Map),
        KeyCode::Char('l') => app.set_view(ViewMode::List),
        KeyCode::Tab => app.toggle_view(),
        KeyCode::Left => app.cycle_filter(false),
        KeyCode::Right => app.cycle_filter(true),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char(c @ '0'..='3') => {
            let index = c as usize - '0' as usize;
            app.select_filter(FILTER_OPTIONS[index]);
        }
        _ => return false,
    }
    true
}
