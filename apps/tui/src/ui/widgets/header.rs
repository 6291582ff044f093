use crate::app::state::{filter_index, FILTER_OPTIONS};
use crate::app::App;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use renewables_core::{filter_label, ViewMode};

pub fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("== Renewable Projects ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area.inner(Margin::new(1, 1)));

    let toggle = Paragraph::new(view_toggle_line(app.store.view_mode())).alignment(Alignment::Left);
    f.render_widget(toggle, chunks[0]);

    let filter = Paragraph::new(filter_select_line(app)).alignment(Alignment::Right);
    f.render_widget(filter, chunks[1]);
}

/// Both modes are always drawn; exactly one is highlighted.
fn view_toggle_line(active: ViewMode) -> TextLine<'static> {
    let mut spans = Vec::new();
    for mode in [ViewMode::Map, ViewMode::List] {
        let style = if mode == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", mode.label()), style));
        spans.push(Span::raw(" "));
    }
    TextLine::from(spans)
}

fn filter_select_line(app: &App) -> TextLine<'_> {
    let selected = filter_index(app.store.selected_type());
    let mut spans = vec![Span::styled(
        "Project Type: ",
        Style::default().fg(Color::Gray),
    )];

    for (index, option) in FILTER_OPTIONS.iter().enumerate() {
        let style = if index == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", filter_label(*option)), style));
    }

    TextLine::from(spans)
}
