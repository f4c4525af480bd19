use thiserror::Error;

#[derive(Error, Debug)]
pub enum TidyfigTextError {
    #[error("Unsupported font face: `{0}`")]
    UnsupportedFace(String),
}
