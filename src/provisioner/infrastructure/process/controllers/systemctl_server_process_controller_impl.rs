use std::time::Duration;

use async_trait::async_trait;

use crate::provisioner::{
    domain::model::{
        enums::provisioner_domain_error::ProvisionerDomainError,
        value_objects::server_service_name::ServerServiceName,
    },
    infrastructure::process::{
        process_command_runner::run_bounded, server_process_controller::ServerProcessController,
    },
};

pub struct SystemctlServerProcessControllerImpl {
    service_name: ServerServiceName,
    command_timeout: Duration,
}

impl SystemctlServerProcessControllerImpl {
    pub fn new(service_name: ServerServiceName, command_timeout: Duration) -> Self {
        Self {
            service_name,
            command_timeout,
        }
    }
}

#[async_trait]
impl ServerProcessController for SystemctlServerProcessControllerImpl {
    fn describe(&self) -> String {
        format!("systemd unit {}", self.service_name.value())
    }

    async fn is_running(&self) -> Result<bool, ProvisionerDomainError> {
        let output = run_bounded(
            "systemctl",
            &["is-active", "--quiet", self.service_name.value()],
            self.command_timeout,
        )
        .await?;

        // Any non-zero exit means "not active": inactive, failed or unknown unit.
        Ok(output.success)
    }

    async fn start(&self, timeout: Duration) -> Result<(), ProvisionerDomainError> {
        tracing::info!(service = %self.service_name.value(), "starting database server unit");

        let output = run_bounded(
            "systemctl",
            &["start", self.service_name.value()],
            timeout,
        )
        .await?;

        if !output.success {
            return Err(ProvisionerDomainError::InfrastructureError(format!(
                "systemctl start {} failed (exit {}): {}",
                self.service_name.value(),
                output.exit_code,
                output.stderr
            )));
        }

        Ok(())
    }
}
