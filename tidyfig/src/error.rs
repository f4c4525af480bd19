use std::path::PathBuf;

use thiserror::Error;
use tidyfig_eps::error::TidyfigEpsError;
use tidyfig_layout::error::TidyfigLayoutError;
use tidyfig_text::error::TidyfigTextError;

#[derive(Error, Debug)]
pub enum TidyfigError {
    #[error("Invalid option {option}: {reason}")]
    InvalidOption { option: String, reason: String },

    #[error("I/O error on `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse `{path}`: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize layout: {0}")]
    Serialize(serde_json::Error),

    #[error(transparent)]
    Layout(#[from] TidyfigLayoutError),

    #[error(transparent)]
    Eps(#[from] TidyfigEpsError),

    #[error(transparent)]
    Text(#[from] TidyfigTextError),
}

impl TidyfigError {
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        TidyfigError::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}
