pub mod claim;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod sanitize;
pub mod store;
pub mod validate;

// Re-export commonly used types
pub use claim::{Claim, ClaimCategory, ClaimDraft, ClaimForm};
pub use controller::{
    SUBMIT_FAILURE_NOTICE, SubmissionController, SubmissionState, SubmitOutcome,
};
pub use error::{IntakeError, Result};
pub use gateway::ClaimGateway;
#[cfg(feature = "http")]
pub use gateway::HttpClaimGateway;
pub use sanitize::sanitize;
pub use store::ClaimStore;
pub use validate::{Field, FieldErrors, validate_form, validate_value};
