use thiserror::Error;

pub type Result<T> = std::result::Result<T, RoastError>;

/// Failure taxonomy for the roast pipeline.
///
/// `Validation` and `Consent` are raised before any network call and always
/// reach the caller. `Upstream` and `ContractViolation` from the image
/// analysis step are caught by the orchestrator and replaced with a simulated
/// fragment; the same errors from the completion step propagate unchanged.
#[derive(Debug, Error)]
pub enum RoastError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Consent(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("upstream request failed with status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("unexpected upstream payload: {0}")]
    ContractViolation(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
