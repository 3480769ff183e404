use thiserror::Error;

pub type ViewportResult<T> = Result<T, ViewportError>;

#[derive(Debug, Error)]
pub enum ViewportError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("missing surface element: {0}")]
    MissingSurface(String),

    #[error("chart engine failure: {0}")]
    Engine(String),

    #[error("fetch failed with status {status}: {message}")]
    Fetch { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid config: {0}")]
    Config(String),
}
