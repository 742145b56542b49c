use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::provisioner::domain::model::enums::provisioner_domain_error::ProvisionerDomainError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TranscriptEntryKind {
    Statement,
    Event,
}

impl TranscriptEntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Statement => "statement",
            Self::Event => "event",
        }
    }
}

#[derive(Clone, Debug)]
pub struct TranscriptEntryRecord {
    kind: TranscriptEntryKind,
    text: String,
    occurred_at: DateTime<Utc>,
}

impl TranscriptEntryRecord {
    pub fn statement(text: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            kind: TranscriptEntryKind::Statement,
            text: text.into(),
            occurred_at,
        }
    }

    pub fn event(text: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            kind: TranscriptEntryKind::Event,
            text: text.into(),
            occurred_at,
        }
    }

    pub fn kind(&self) -> TranscriptEntryKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// Advisory record of what a run sent to the server. Callers log write
/// failures and carry on.
#[async_trait]
pub trait ProvisioningTranscriptRepository: Send + Sync {
    async fn save_entry(&self, entry: &TranscriptEntryRecord) -> Result<(), ProvisionerDomainError>;
}
