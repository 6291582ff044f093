use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use renewables_core::{filter_label, Completion, Project};
use std::io::Stdout;
use std::time::Duration;

use crate::app::{handle_input, App};
use crate::ui;

// Configure event poll timeout (ms)
const EVENT_POLL_TIMEOUT: u64 = 50;

/// Run the application in headless mode (no UI): one load, print, exit.
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.start();
    let completion = app.settle().await;

    if let Some(error) = app.store.error() {
        return Err(eyre!("Failed to load projects: {error}"));
    }
    if completion != Some(Completion::Applied) {
        return Err(eyre!("Project load did not complete"));
    }

    if json {
        render_headless_json(app)?;
    } else {
        render_headless_table(app);
    }

    Ok(())
}

fn render_headless_table(app: &App) {
    let projects = app.store.projects();

    println!("\nRenewable Projects ({})", filter_label(app.store.selected_type()));
    println!("=========================");
    println!("Total projects: {}", projects.len());

    println!("\nBy Type:");
    for (kind, count) in app.store.counts_by_type() {
        println!("- {kind}: {count}");
    }

    println!("\nProjects:");
    for project in projects {
        println!(
            "- {} | {} | {:.4} | {:.4}",
            project.name,
            project.type_label(),
            project.latitude,
            project.longitude
        );
    }
}

fn render_headless_json(app: &App) -> Result<()> {
    let report = HeadlessReport {
        filter: app.store.selected_type().map(|kind| kind.as_str().to_string()),
        total: app.store.projects().len(),
        projects: app.store.projects(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}

#[derive(serde::Serialize)]
struct HeadlessReport<'a> {
    filter: Option<String>,
    total: usize,
    projects: &'a [Project],
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    app.start();

    loop {
        // Land finished loads before drawing so a frame never shows half a transition
        app.pump();
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        tracing::debug!("redraw after resize failed");
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read terminal event");
                }
            }
        }

        // Let spawned loads make progress between frames
        tokio::task::yield_now().await;
    }

    tracing::info!("event loop finished");
    Ok(())
}
