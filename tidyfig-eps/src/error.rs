use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TidyfigEpsError {
    #[error("Failed to read `{path}`: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write `{path}`: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid font name `{0}`")]
    InvalidFontName(String),
}
