use crate::app::App;
use crate::ui::widgets::map::type_color;
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub fn render_list_view(app: &App, f: &mut Frame<'_>, area: Rect) {
    let projects = app.store.projects();

    if projects.is_empty() {
        let block = Block::default()
            .title("Projects")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let message = if app.store.loading() {
            "Loading projects..."
        } else {
            "No projects found."
        };
        let paragraph = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
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

    let total_rows = projects.len();
    // borders plus header row
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let scroll_offset = scroll_offset(total_rows, max_visible_rows, app.selected_index);

    let rows = projects
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(max_visible_rows)
        .map(|(i, project)| {
            let style = if i == app.selected_index {
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
        });

    let widths = [
        Constraint::Min(20),
        Constraint::Length(15),
        Constraint::Length(12),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    "Projects ({} of {})",
                    app.selected_index + 1,
                    total_rows
                ))
                .borders(Borders::ALL),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}
