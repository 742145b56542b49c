use async_trait::async_trait;

use crate::provisioner::{
    domain::model::enums::provisioner_domain_error::ProvisionerDomainError,
    infrastructure::persistence::repositories::provisioning_transcript_repository::{
        ProvisioningTranscriptRepository, TranscriptEntryRecord,
    },
};

pub struct DisabledProvisioningTranscriptRepositoryImpl;

#[async_trait]
impl ProvisioningTranscriptRepository for DisabledProvisioningTranscriptRepositoryImpl {
    async fn save_entry(&self, _entry: &TranscriptEntryRecord) -> Result<(), ProvisionerDomainError> {
        Ok(())
    }
}
