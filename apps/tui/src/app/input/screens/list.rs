use crate::app::state::App;
use crossterm::event::KeyCode;

const PAGE_STEP: usize = 5;

pub fn handle_list_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up => app.select_previous(1),
        KeyCode::Down => app.select_next(1),
        KeyCode::PageUp => app.select_previous(PAGE_STEP),
        KeyCode::PageDown => app.select_next(PAGE_STEP),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        _ => {}
    }
}
