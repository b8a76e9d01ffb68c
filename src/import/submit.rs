use std::time::Duration;

use super::outcome::ValidatedRecord;
use super::schema::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("username not set")]
    MissingPrincipal,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Remote store for an accepted batch. Called once per import attempt with
/// the complete batch.
pub trait Submitter {
    fn submit(
        &self,
        kind: EntityKind,
        principal: &str,
        records: &[ValidatedRecord],
    ) -> Result<(), SubmitError>;
}

pub struct HttpSubmitter {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpSubmitter {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn import_url(&self, kind: EntityKind) -> String {
        format!("{}/{}/import/", self.base_url, kind.collection())
    }
}

impl Submitter for HttpSubmitter {
    fn submit(
        &self,
        kind: EntityKind,
        principal: &str,
        records: &[ValidatedRecord],
    ) -> Result<(), SubmitError> {
        let url = self.import_url(kind);
        tracing::info!(%url, count = records.len(), "submitting import batch");
        let response = self
            .client
            .post(&url)
            .query(&[("username", principal)])
            .json(records)
            .send()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
