use async_trait::async_trait;

use crate::provisioner::domain::{
    model::{
        commands::provision_database_command::ProvisionDatabaseCommand,
        entities::provisioning_result::ProvisioningResult,
        enums::provisioner_domain_error::ProvisionerDomainError,
    },
    services::provisioning_step_listener::{
        ProvisioningStepListener, SilentProvisioningStepListener,
    },
};

#[async_trait]
pub trait DatabaseProvisioningCommandService: Send + Sync {
    async fn handle_provision(
        &self,
        command: ProvisionDatabaseCommand,
    ) -> Result<ProvisioningResult, ProvisionerDomainError> {
        self.handle_provision_reporting(command, &SilentProvisioningStepListener)
            .await
    }

    /// Like `handle_provision`, but reports every completed step to
    /// `listener` as it happens, so outcomes survive a later failure.
    async fn handle_provision_reporting(
        &self,
        command: ProvisionDatabaseCommand,
        listener: &dyn ProvisioningStepListener,
    ) -> Result<ProvisioningResult, ProvisionerDomainError>;
}
