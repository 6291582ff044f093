use async_trait::async_trait;
use color_eyre::Result;
use renewables_core::{parse_projects, projects_url, FetchError, Project, ProjectType};
use std::fmt;
use std::time::Duration;

/// Anything that can produce the project list for a filter.
#[async_trait]
pub trait ProjectSource: Send + Sync + fmt::Debug {
    async fn fetch(&self, filter: Option<ProjectType>) -> Result<Vec<Project>, FetchError>;
}

/// `GET {base}/projects[?project_type=..]` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProjectSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProjectSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("renewables/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl ProjectSource for HttpProjectSource {
    async fn fetch(&self, filter: Option<ProjectType>) -> Result<Vec<Project>, FetchError> {
        let url = projects_url(&self.base_url, filter);
        tracing::debug!(%url, "requesting projects");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(describe(&e)))?;

        parse_projects(&body)
    }
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("could not connect: {error}")
    } else {
        error.to_string()
    }
}
