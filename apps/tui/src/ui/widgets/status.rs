use crate::app::App;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let line = if let Some(error) = app.store.error() {
        error_line(error, !app.store.projects().is_empty())
    } else if app.store.loading() {
        let throbber = Throbber::default()
            .style(Style::default().fg(Color::Cyan))
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX);
        TextLine::from(vec![
            throbber.to_symbol_span(&app.throbber_state),
            Span::styled(" Loading projects...", Style::default().fg(Color::Cyan)),
        ])
    } else {
        TextLine::from(Span::styled(
            summary(app),
            Style::default().fg(Color::Green),
        ))
    };

    let paragraph = Paragraph::new(line)
        .block(
            Block::default()
                .title("Status")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn error_line(error: &str, has_stale_data: bool) -> TextLine<'static> {
    let mut spans = vec![Span::styled(
        format!("Error: {error}"),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )];
    if has_stale_data {
        spans.push(Span::styled(
            "  (showing last loaded projects, press r to retry)",
            Style::default().fg(Color::Gray),
        ));
    } else {
        spans.push(Span::styled(
            "  (press r to retry)",
            Style::default().fg(Color::Gray),
        ));
    }
    TextLine::from(spans)
}

fn summary(app: &App) -> String {
    let total = app.store.projects().len();
    let counts = app
        .store
        .counts_by_type()
        .into_iter()
        .map(|(kind, count)| format!("{kind} {count}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut text = if total == 0 {
        "No projects".to_string()
    } else {
        format!("{total} projects ({counts})")
    };

    if let Some(updated) = app.last_updated {
        text.push_str(&format!("  | updated {}", updated.format("%H:%M:%S")));
    }
    text
}
