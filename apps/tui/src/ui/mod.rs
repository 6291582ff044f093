// UI module for the renewables viewer
// Both views render from the same store state

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use renewables_core::ViewMode;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header: view toggle and filter
            Constraint::Min(8),    // Map or table
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    widgets::header::render_header(app, f, layout[0]);

    match app.store.view_mode() {
        ViewMode::Map => screens::map::render_map_view(app, f, layout[1]),
        ViewMode::List => screens::list::render_list_view(app, f, layout[1]),
    }

    widgets::status::render_status(app, f, layout[2]);
    render_shortcuts(f, layout[3]);

    if app.show_help {
        widgets::popup::render_help_popup(f, f.area());
    }
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let help_text = vec![
        Span::styled("Tab", key_style),
        Span::raw(": Map/List   "),
        Span::styled("←/→", key_style),
        Span::raw(": Filter   "),
        Span::styled("↑/↓", key_style),
        Span::raw(": Select   "),
        Span::styled("r", key_style),
        Span::raw(": Reload   "),
        Span::styled("?", key_style),
        Span::raw(": Help   "),
        Span::styled("q", key_style),
        Span::raw(": Quit"),
    ];

    let paragraph = Paragraph::new(TextLine::from(help_text)).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::ui;
    use crate::app::source::ProjectSource;
    use crate::app::App;
    use crate::config::AppConfig;
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use renewables_core::{FetchError, Project, ProjectType, ViewMode};
    use std::sync::Arc;

    #[derive(Debug)]
    struct NoSource;

    #[async_trait]
    impl ProjectSource for NoSource {
        async fn fetch(&self, _filter: Option<ProjectType>) -> Result<Vec<Project>, FetchError> {
            Ok(Vec::new())
        }
    }

    fn app_with(projects: Vec<Project>, view: ViewMode) -> App {
        let config = AppConfig {
            initial_view: view,
            ..AppConfig::default()
        };
        let mut app = App::new(&config, Arc::new(NoSource));
        app.store.replace_projects(projects);
        app
    }

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(app, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn farm() -> Project {
        Project {
            id: 1,
            name: "Solar Farm Alpha".to_string(),
            kind: "solar".to_string(),
            latitude: 40.7128,
            longitude: -74.006,
        }
    }

    #[test]
    fn list_view_shows_table_rows() {
        let screen = rendered(&app_with(vec![farm()], ViewMode::List));

        assert!(screen.contains("Solar Farm Alpha"));
        assert!(screen.contains("Latitude"));
        assert!(screen.contains("40.7128"));
    }

    #[test]
    fn map_view_shows_selected_marker_details() {
        let screen = rendered(&app_with(vec![farm()], ViewMode::Map));

        assert!(screen.contains("Map (1 projects)"));
        assert!(screen.contains("Location: 40.7128, -74.0060"));
    }

    #[test]
    fn error_is_shown_alongside_stale_data() {
        let mut app = app_with(vec![farm()], ViewMode::List);
        app.store.set_error("network error: down");

        let screen = rendered(&app);

        assert!(screen.contains("Error: network error: down"));
        assert!(screen.contains("Solar Farm Alpha"));
    }
}
