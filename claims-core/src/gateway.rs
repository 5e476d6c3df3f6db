use async_trait::async_trait;

use crate::claim::ClaimDraft;
use crate::error::{IntakeError, Result};

/// Network boundary for claim submission. A single attempt per call: no
/// retries, no timeout, no cancellation at this layer.
#[async_trait]
pub trait ClaimGateway: Send + Sync {
    /// Send a validated draft to the backend. Any acknowledgment is `Ok`;
    /// the response body is not consumed beyond that.
    async fn submit(&self, draft: &ClaimDraft) -> Result<()>;
}

/// HTTP implementation posting the draft as JSON to a fixed endpoint
#[cfg(feature = "http")]
pub struct HttpClaimGateway {
    client: reqwest::Client,
    endpoint: String,
}

#[cfg(feature = "http")]
impl HttpClaimGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl ClaimGateway for HttpClaimGateway {
    async fn submit(&self, draft: &ClaimDraft) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(draft)
            .send()
            .await
            .map_err(|e| IntakeError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(IntakeError::Rejected(status.as_u16()))
        }
    }
}
