use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use ratzilla::event::KeyCode;
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Borders, Cell, Paragraph, Row, Table,
    },
    Frame, Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use renewables_core::{
    filter_label, projects_url, Action, Completion, Effect, LoadTracker, Project, ProjectType,
    Store, ViewMode,
};
use wasm_bindgen_futures::spawn_local;

mod fetch;
mod spinner;

use spinner::{advance_spinner, spinner_symbol, SpinnerMode};

const API_URL: &str = match option_env!("API_URL") {
    Some(url) => url,
    None => "/api",
};

const FILTER_COUNT: usize = ProjectType::ALL.len() + 1;

struct WebApp {
    store: Store,
    tracker: LoadTracker,
    selected: usize,
    spinner_phase: f64,
    last_tick: Option<f64>,
}

type SharedApp = Rc<RefCell<WebApp>>;

fn main() -> io::Result<()> {
    let app: SharedApp = Rc::new(RefCell::new(WebApp {
        store: Store::new(),
        tracker: LoadTracker::new(),
        selected: 0,
        spinner_phase: 0.0,
        last_tick: None,
    }));

    let initial = app.borrow_mut().store.apply(Action::RequestReload);
    run_effect(&app, initial);

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let app = app.clone();
        move |event| handle_key(&app, event.code)
    });

    terminal.draw_web(move |f| {
        let mut state = app.borrow_mut();
        let mode = if state.store.loading() {
            SpinnerMode::Spinning
        } else {
            SpinnerMode::Idle
        };
        let (phase, last_tick) = advance_spinner(
            state.spinner_phase,
            state.last_tick,
            js_sys::Date::now() / 1000.0,
            mode,
        );
        state.spinner_phase = phase;
        state.last_tick = last_tick;
        state.selected = state
            .selected
            .min(state.store.projects().len().saturating_sub(1));

        render(&state, f);
    });

    Ok(())
}

fn filter_position(filter: Option<ProjectType>) -> usize {
    filter.map_or(0, |kind| kind.index() + 1)
}

fn filter_at(position: usize) -> Option<ProjectType> {
    position.checked_sub(1).and_then(ProjectType::from_index)
}

fn handle_key(app: &SharedApp, code: KeyCode) {
    let effect = {
        let mut state = app.borrow_mut();
        let state = &mut *state;
        let current = filter_position(state.store.selected_type());
        let len = state.store.projects().len();

        match code {
            KeyCode::Char('m') => {
                state.store.set_view_mode(ViewMode::Map);
                None
            }
            KeyCode::Char('l') => {
                state.store.set_view_mode(ViewMode::List);
                None
            }
            KeyCode::Tab => {
                state.store.toggle_view_mode();
                None
            }
            KeyCode::Char('r') => state.store.apply(Action::RequestReload),
            KeyCode::Char(digit @ '0'..='3') => {
                let position = digit.to_digit(10).map_or(0, |d| d as usize);
                state.store.apply(Action::SetSelectedType(filter_at(position)))
            }
            KeyCode::Left => state.store.apply(Action::SetSelectedType(filter_at(
                (current + FILTER_COUNT - 1) % FILTER_COUNT,
            ))),
            KeyCode::Right => state
                .store
                .apply(Action::SetSelectedType(filter_at((current + 1) % FILTER_COUNT))),
            KeyCode::Up => {
                state.selected = state.selected.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if state.selected + 1 < len {
                    state.selected += 1;
                }
                None
            }
            _ => None,
        }
    };

    run_effect(app, effect);
}

fn run_effect(app: &SharedApp, effect: Option<Effect>) {
    let Some(Effect::LoadProjects(filter)) = effect else {
        return;
    };

    let ticket = {
        let mut state = app.borrow_mut();
        let state = &mut *state;
        state.tracker.begin(&mut state.store, filter)
    };
    let url = projects_url(API_URL, filter);
    let app = Rc::clone(app);

    spawn_local(async move {
        let outcome = fetch::fetch_projects(&url).await;
        if let Err(error) = &outcome {
            web_sys::console::error_1(&format!("Failed to load projects: {error}").into());
        }

        let mut state = app.borrow_mut();
        let state = &mut *state;
        if state.tracker.complete(&mut state.store, ticket, outcome) == Completion::Applied {
            state.selected = 0;
        }
    });
}

fn type_color(kind: Option<ProjectType>) -> Color {
    match kind {
        Some(ProjectType::Solar) => Color::Yellow,
        Some(ProjectType::Wind) => Color::Cyan,
        Some(ProjectType::Hydroelectric) => Color::Rgb(0, 120, 238),
        None => Color::Gray,
    }
}

fn render(app: &WebApp, f: &mut Frame<'_>) {
    let area = f.area();
    let block = Block::default()
        .title("Renewable Projects")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area).inner(Margin::new(1, 1));
    f.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    render_controls(app, f, layout[0]);
    match app.store.view_mode() {
        ViewMode::Map => render_map(app, f, layout[1]),
        ViewMode::List => render_table(app, f, layout[1]),
    }
    render_status(app, f, layout[2]);

    let keys = Paragraph::new("m map  l list  Tab toggle  ←/→ 0-3 filter  ↑/↓ select  r reload")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(keys, layout[3]);
}

fn render_controls(app: &WebApp, f: &mut Frame<'_>, area: Rect) {
    let active = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let inactive = Style::default().fg(Color::Gray);

    let mut spans = Vec::new();
    for mode in [ViewMode::Map, ViewMode::List] {
        let style = if mode == app.store.view_mode() {
            active
        } else {
            inactive
        };
        spans.push(Span::styled(format!(" {} ", mode.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw("   Type: "));
    spans.push(Span::styled(
        filter_label(app.store.selected_type()),
        Style::default()
            .fg(type_color(app.store.selected_type()))
            .add_modifier(Modifier::BOLD),
    ));

    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

fn render_map(app: &WebApp, f: &mut Frame<'_>, area: Rect) {
    let projects = app.store.projects();
    let (x_bounds, y_bounds) = app.store.bounds().map_or(
        ([-128.6, -68.6], [24.8, 54.8]),
        |bounds| {
            (
                [
                    (bounds.min_longitude - 5.0).max(-180.0),
                    (bounds.max_longitude + 5.0).min(180.0),
                ],
                [
                    (bounds.min_latitude - 5.0).max(-90.0),
                    (bounds.max_latitude + 5.0).min(90.0),
                ],
            )
        },
    );

    let layers = marker_layers(projects);
    let selected = projects.get(app.selected).map(|project| {
        (
            project.longitude,
            project.latitude,
            project.name.clone(),
        )
    });

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(format!("Map ({} projects)", projects.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for (color, coords) in &layers {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: *color,
                });
            }
            if let Some((x, y, name)) = &selected {
                ctx.print(
                    *x,
                    *y,
                    Span::styled(
                        format!("● {name}"),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}

/// One point layer per known type plus a gray layer for unrecognized types.
fn marker_layers(projects: &[Project]) -> Vec<(Color, Vec<(f64, f64)>)> {
    let kinds = ProjectType::ALL
        .iter()
        .map(|kind| Some(*kind))
        .chain(std::iter::once(None));

    kinds
        .map(|kind| {
            let coords = projects
                .iter()
                .filter(|project| project.project_type() == kind)
                .map(|project| (project.longitude, project.latitude))
                .collect::<Vec<_>>();
            (type_color(kind), coords)
        })
        .collect()
}

fn render_table(app: &WebApp, f: &mut Frame<'_>, area: Rect) {
    let projects = app.store.projects();
    let block = Block::default()
        .title(format!("Projects ({})", projects.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    if projects.is_empty() {
        let message = if app.store.loading() {
            "Loading projects..."
        } else {
            "No projects found."
        };
        f.render_widget(
            Paragraph::new(message)
                .block(block)
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Type"),
        Cell::from("Latitude"),
        Cell::from("Longitude"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let visible = area.height.saturating_sub(3) as usize;
    let offset = app.selected.saturating_sub(visible.saturating_sub(1));
    let rows = projects
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, project)| project_row(project, i == app.selected));

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(15),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(block)
    .column_spacing(1);

    f.render_widget(table, area);
}

fn project_row(project: &Project, selected: bool) -> Row<'static> {
    let style = if selected {
        Style::default()
            .bg(Color::Rgb(0, 0, 238))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(type_color(project.project_type()))
    };

    Row::new(vec![
        Cell::from(project.name.clone()),
        Cell::from(project.type_label()),
        Cell::from(format!("{:.4}", project.latitude)),
        Cell::from(format!("{:.4}", project.longitude)),
    ])
    .style(style)
}

fn render_status(app: &WebApp, f: &mut Frame<'_>, area: Rect) {
    let line = if let Some(error) = app.store.error() {
        TextLine::from(Span::styled(
            format!("Error: {error}  (press r to retry)"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else if app.store.loading() {
        TextLine::from(Span::styled(
            format!("{} Loading projects...", spinner_symbol(app.spinner_phase)),
            Style::default().fg(Color::Cyan),
        ))
    } else {
        let counts = app
            .store
            .counts_by_type()
            .into_iter()
            .map(|(kind, count)| format!("{kind} {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        TextLine::from(Span::styled(
            format!("{} projects ({counts})", app.store.projects().len()),
            Style::default().fg(Color::Green),
        ))
    };

    f.render_widget(Paragraph::new(line), area);
}
