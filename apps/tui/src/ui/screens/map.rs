use crate::app::App;
use crate::ui::widgets::map::{type_color, viewport};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use renewables_core::{Project, ProjectType};

pub fn render_map_view(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    render_markers(app, f, chunks[0]);
    render_marker_details(app.selected_project(), f, chunks[1]);
}

fn render_markers(app: &App, f: &mut Frame<'_>, area: Rect) {
    let projects = app.store.projects();
    let view = viewport(app.store.bounds());

    // one point layer per color
    let mut layers: Vec<(Color, Vec<(f64, f64)>)> = ProjectType::ALL
        .iter()
        .map(|kind| (type_color(Some(*kind)), Vec::new()))
        .chain(std::iter::once((type_color(None), Vec::new())))
        .collect();
    for project in projects {
        let slot = project
            .project_type()
            .map_or(ProjectType::ALL.len(), ProjectType::index);
        layers[slot].1.push((project.longitude, project.latitude));
    }

    let selected = app.selected_project().cloned();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(format!("Map ({} projects)", projects.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .marker(Marker::Braille)
        .x_bounds(view.x_bounds)
        .y_bounds(view.y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();

            for (color, coords) in &layers {
                if !coords.is_empty() {
                    ctx.draw(&Points {
                        coords: coords.as_slice(),
                        color: *color,
                    });
                }
            }

            if let Some(project) = &selected {
                ctx.draw(&Circle {
                    x: project.longitude,
                    y: project.latitude,
                    radius: 1.0,
                    color: Color::White,
                });
                ctx.print(
                    project.longitude + 1.5,
                    project.latitude,
                    Span::styled(
                        project.name.clone(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn render_marker_details(project: Option<&Project>, f: &mut Frame<'_>, area: Rect) {
    let line = project.map_or_else(
        || {
            TextLine::from(Span::styled(
                "No project selected",
                Style::default().fg(Color::Gray),
            ))
        },
        |project| {
            TextLine::from(vec![
                Span::styled(
                    project.name.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  Type: "),
                Span::styled(
                    project.type_label(),
                    Style::default().fg(type_color(project.project_type())),
                ),
                Span::raw(format!(
                    "  Location: {:.4}, {:.4}",
                    project.latitude, project.longitude
                )),
            ])
        },
    );

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title("Selected")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray)),
    );
    f.render_widget(paragraph, area);
}
