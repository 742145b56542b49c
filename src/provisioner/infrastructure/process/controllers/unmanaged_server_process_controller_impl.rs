use std::time::Duration;

use async_trait::async_trait;

use crate::provisioner::{
    domain::model::enums::provisioner_domain_error::ProvisionerDomainError,
    infrastructure::process::server_process_controller::ServerProcessController,
};

/// Used when nobody told us how the server is run: it can only be pinged.
pub struct UnmanagedServerProcessControllerImpl;

#[async_trait]
impl ServerProcessController for UnmanagedServerProcessControllerImpl {
    fn describe(&self) -> String {
        "unmanaged server".to_string()
    }

    async fn is_running(&self) -> Result<bool, ProvisionerDomainError> {
        Ok(false)
    }

    async fn start(&self, _timeout: Duration) -> Result<(), ProvisionerDomainError> {
        Err(ProvisionerDomainError::InfrastructureError(
            "server is not managed by the provisioner (server control is 'none')".to_string(),
        ))
    }
}
