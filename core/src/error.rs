use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can abort a pipeline run.
#[derive(Debug, Error)]
pub enum Error {
    /// The upload itself is unusable: wrong extension, corrupt archive, bad JSON, no history files
    #[error("{0}")]
    BadInput(String),

    /// Ingestion worked but nothing survived the requested filters
    #[error("{0}")]
    EmptyResult(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn bad_input(msg: impl Into<String>) -> Self { Self::BadInput(msg.into()) }

    pub fn empty_timeframe() -> Self { Self::EmptyResult("No listening history in this timeframe".to_owned()) }

    pub fn empty_artist(artist: &str) -> Self {
        Self::EmptyResult(format!("No listening history for artist '{artist}'"))
    }

    /// Whether the caller is at fault, as opposed to the environment
    #[inline]
    pub fn is_client_error(&self) -> bool { matches!(self, Self::BadInput(_) | Self::EmptyResult(_)) }
}
