/// Rejected inputs at the store boundary. State is never touched when one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("invalid view mode: {0:?} (expected \"map\" or \"list\")")]
    InvalidViewMode(String),
    #[error("invalid project type: {0:?} (expected solar, wind or hydroelectric)")]
    InvalidProjectType(String),
}

/// Every way a project load can fail. The `Display` text is what ends up in
/// the store's `error` field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("server responded {code} {reason}")]
    Status { code: u16, reason: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        Self::Malformed(error.to_string())
    }
}
