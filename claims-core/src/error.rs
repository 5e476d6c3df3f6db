use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntakeError>;

/// Failures crossing the submission boundary. Field validation problems are
/// not errors in this sense; they are reported as `FieldErrors` values.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The request never reached the backend or the connection dropped
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("submission rejected with status {0}")]
    Rejected(u16),
}
