use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    /// The operation needs a parsed match and none is loaded.
    #[error("{operation} requires parsed match data, but none is loaded")]
    NotParsed { operation: &'static str },

    #[error("invalid return type {0:?}, expected one of \"structured\", \"json\", \"tabular\", \"df\"")]
    InvalidReturnType(String),

    #[error("invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("malformed match document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CleanError>;
