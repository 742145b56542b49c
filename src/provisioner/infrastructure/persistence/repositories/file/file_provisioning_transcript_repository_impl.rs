use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use uuid::Uuid;

use crate::provisioner::{
    domain::model::enums::provisioner_domain_error::ProvisionerDomainError,
    infrastructure::persistence::repositories::provisioning_transcript_repository::{
        ProvisioningTranscriptRepository, TranscriptEntryRecord,
    },
};

/// Appends one line per entry: `<rfc3339> <run-id> <kind> <text>`. The run id
/// tells apart interleaved lines from concurrent invocations.
pub struct FileProvisioningTranscriptRepositoryImpl {
    path: PathBuf,
    run_id: Uuid,
}

impl FileProvisioningTranscriptRepositoryImpl {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            run_id: Uuid::now_v7(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }
}

#[async_trait]
impl ProvisioningTranscriptRepository for FileProvisioningTranscriptRepositoryImpl {
    async fn save_entry(&self, entry: &TranscriptEntryRecord) -> Result<(), ProvisionerDomainError> {
        let line = format!(
            "{} {} {} {}\n",
            entry.occurred_at().to_rfc3339(),
            self.run_id,
            entry.kind().as_str(),
            entry.text().replace('\n', " ")
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| ProvisionerDomainError::InfrastructureError(e.to_string()))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| ProvisionerDomainError::InfrastructureError(e.to_string()))?;

        Ok(())
    }
}
