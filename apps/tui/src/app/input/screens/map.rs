use crate::app::input::helpers::cycle_index;
use crate::app::state::App;
use crossterm::event::KeyCode;

/// Up/Down walk the markers, wrapping at either end.
pub fn handle_map_input(app: &mut App, key: KeyCode) {
    let len = app.store.projects().len();
    match key {
        KeyCode::Up => app.selected_index = cycle_index(app.selected_index, len, false),
        KeyCode::Down => app.selected_index = cycle_index(app.selected_index, len, true),
        _ => {}
    }
}
