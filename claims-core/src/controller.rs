//! SubmissionController – drives one claim submission from raw form state to
//! an accepted claim: validate → send through the gateway → promote and
//! append to the store → report the outcome.
//!
//! The controller owns the form, the surfaced error state, and the claim
//! store, and holds a shared gateway handle. It is built for event-driven,
//! single-threaded use: each user action maps to one method call, and the
//! only suspension point is the in-flight network call. At most one request
//! is in flight at a time; submits arriving while `Pending` are ignored, and
//! callers should disable their submit control off `is_pending()`.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::claim::{Claim, ClaimForm};
use crate::gateway::ClaimGateway;
use crate::store::ClaimStore;
use crate::validate::{Field, FieldErrors, validate_form};

/// Notice surfaced for any transport or backend failure. The underlying
/// cause goes to diagnostics, never to the user.
pub const SUBMIT_FAILURE_NOTICE: &str = "Something went wrong. Please try again.";

/// Stored controller states. Success is transient: an acknowledged
/// submission updates the store and folds straight back into `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Pending,
    Error,
}

/// Result of one submit action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend acknowledged; the claim is in the store under this id
    Accepted { id: uuid::Uuid },
    /// Validation failed; `field` is the first failing field in priority
    /// order (date, category, description) and should receive focus. No
    /// network call was made.
    Invalid { field: Field },
    /// The network call failed; form values are preserved for retry
    Failed,
    /// Another submission is already in flight
    Ignored,
}

pub struct SubmissionController {
    gateway: Arc<dyn ClaimGateway>,
    store: ClaimStore,
    form: ClaimForm,
    state: SubmissionState,
    errors: FieldErrors,
    notice: Option<&'static str>,
}

impl SubmissionController {
    pub fn new(gateway: Arc<dyn ClaimGateway>) -> Self {
        Self {
            gateway,
            store: ClaimStore::new(),
            form: ClaimForm::default(),
            state: SubmissionState::Idle,
            errors: FieldErrors::new(),
            notice: None,
        }
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.form.date = date.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.form.category = category.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    pub fn form(&self) -> &ClaimForm {
        &self.form
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == SubmissionState::Pending
    }

    /// Errors surfaced by the last submit: at most one entry, for the first
    /// failing field
    pub fn field_errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Generic failure notice, set while in the `Error` state
    pub fn error_notice(&self) -> Option<&'static str> {
        self.notice
    }

    /// Accepted claims in insertion order
    pub fn claims(&self) -> &[Claim] {
        self.store.claims()
    }

    /// Run one submission attempt from the current form state.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.is_pending() {
            debug!("submit ignored, another submission is in flight");
            return SubmitOutcome::Ignored;
        }

        self.errors = FieldErrors::new();
        self.notice = None;

        let draft = match validate_form(&self.form) {
            Ok(draft) => draft,
            Err(errors) => {
                let field = match errors.first() {
                    Some((field, message)) => {
                        self.errors.insert(field, message);
                        field
                    }
                    None => Field::General,
                };
                self.state = SubmissionState::Idle;
                debug!(?field, "claim rejected by validation");
                return SubmitOutcome::Invalid { field };
            }
        };

        self.state = SubmissionState::Pending;

        match self.gateway.submit(&draft).await {
            Ok(()) => {
                let claim = Claim::accept(draft);
                let id = claim.id;
                info!(claim_id = %id, category = %claim.category, "claim accepted");
                self.store.append(claim);
                self.form.clear();
                self.state = SubmissionState::Idle;
                SubmitOutcome::Accepted { id }
            }
            Err(err) => {
                warn!(error = %err, "claim submission failed");
                self.state = SubmissionState::Error;
                self.notice = Some(SUBMIT_FAILURE_NOTICE);
                SubmitOutcome::Failed
            }
        }
    }
}
