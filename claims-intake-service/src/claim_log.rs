use chrono::{DateTime, SecondsFormat, Utc};
use claims_core::ClaimDraft;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Append-only text log of accepted claims, one line per claim:
/// `<RFC-3339 UTC timestamp> | <date> | <category> | <description>`
pub struct ClaimLog {
    path: PathBuf,
}

impl ClaimLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path from the CLAIMS_LOG_PATH environment variable, `claims.log` if unset
    pub fn from_env() -> Self {
        let path = std::env::var("CLAIMS_LOG_PATH").unwrap_or_else(|_| "claims.log".to_string());
        Self::new(path)
    }

    /// Append one claim, creating the file if absent
    pub async fn append(&self, draft: &ClaimDraft) -> anyhow::Result<()> {
        let line = log_line(draft, Utc::now());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

fn log_line(draft: &ClaimDraft, received_at: DateTime<Utc>) -> String {
    format!(
        "{} | {} | {} | {}\n",
        received_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        draft.date,
        draft.category,
        draft.description
    )
}
