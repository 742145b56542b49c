use std::time::Duration;

use async_trait::async_trait;

use crate::provisioner::domain::model::enums::provisioner_domain_error::ProvisionerDomainError;

/// Platform hook for "is the database server process running / start it".
#[async_trait]
pub trait ServerProcessController: Send + Sync {
    /// Short human-readable label, e.g. `systemd unit postgresql`.
    fn describe(&self) -> String;

    async fn is_running(&self) -> Result<bool, ProvisionerDomainError>;

    /// Starts the server, giving up once `timeout` has elapsed.
    async fn start(&self, timeout: Duration) -> Result<(), ProvisionerDomainError>;
}
