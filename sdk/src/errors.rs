use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the service failed or the response body could not be
    /// read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service returned a non-OK status code.
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The response violated an assumption about the service (e.g. no
    /// candidates returned).
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
}

pub type GenerationResult<T> = Result<T, GenerationError>;
