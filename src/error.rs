use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeetupError {
    #[error("Directory unreachable: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Directory returned HTTP {status}")]
    Remote { status: u16 },

    #[error("Malformed group entry: {field} missing or invalid")]
    MalformedEntry { field: String },

    #[error("No groups found for this location")]
    EmptyCatalog,

    #[error("Unexpected directory payload: {0}")]
    Payload(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MeetupError {
    pub fn malformed(field: impl Into<String>) -> Self {
        MeetupError::MalformedEntry { field: field.into() }
    }

    /// True for failures caused by the directory service rather than by the
    /// search itself. The web layer reports these as an outage.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            MeetupError::Network(_)
                | MeetupError::Remote { .. }
                | MeetupError::Payload(_)
                | MeetupError::MalformedEntry { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MeetupError>;
