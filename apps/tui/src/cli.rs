use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "renewables", version, about = "Renewable projects viewer")]
pub struct CliArgs {
    /// Load once, print the projects and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the projects API base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Initial project type filter (solar, wind, hydroelectric or all)
    #[arg(long = "type", value_name = "TYPE")]
    pub project_type: Option<String>,

    /// Initial view (map or list)
    #[arg(long, value_name = "MODE")]
    pub view: Option<String>,

    /// Override the log file path
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("API_URL", url);
        }
        if let Some(kind) = &self.project_type {
            std::env::set_var("PROJECT_TYPE", kind);
        }
        if let Some(view) = &self.view {
            std::env::set_var("VIEW_MODE", view);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let args = CliArgs::parse_from([
            "renewables",
            "--headless",
            "--json",
            "--type",
            "wind",
            "--view",
            "list",
            "--api-url",
            "http://example/api",
        ]);

        assert!(args.headless);
        assert!(args.json);
        assert_eq!(args.project_type.as_deref(), Some("wind"));
        assert_eq!(args.view.as_deref(), Some("list"));
        assert_eq!(args.api_url.as_deref(), Some("http://example/api"));
    }

    #[test]
    fn help_mentions_filter_flag() {
        assert!(CliArgs::help_text().contains("--type"));
    }
}
