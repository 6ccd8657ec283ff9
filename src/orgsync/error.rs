use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrgSyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty roster: {0}")]
    EmptyRoster(String),

    #[error("not authenticated: {0}")]
    Auth(String),

    #[error("organization '{org}' not accessible: {detail}")]
    OrgAccess { org: String, detail: String },

    #[error("could not create team '{name}': {detail}")]
    TeamCreation { name: String, detail: String },

    #[error("could not run gh: {0}")]
    Gh(String),

    #[error("API error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, OrgSyncError>;
