use clap::Parser;
use color_eyre::Result;
use renewables_tui::cli::CliArgs;
use renewables_tui::config::init_app_config;
use renewables_tui::{event, logging, terminal, App, HttpProjectSource};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = match init_app_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", CliArgs::help_text());
            return Err(e);
        }
    };

    logging::setup_tracing(&config.log_file, config.debug)?;
    tracing::info!(api_url = %config.api_url, "starting renewables viewer");

    let source = HttpProjectSource::new(config.api_url.clone(), config.timeout)?;
    let mut app = App::new(&config, Arc::new(source));

    // Check if we're running in a terminal
    if args.headless || !is_terminal() {
        return event::run_headless(&mut app, args.json).await;
    }

    let mut terminal = terminal::setup()?;

    let result = event::run(&mut terminal, &mut app).await;

    terminal::cleanup(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
