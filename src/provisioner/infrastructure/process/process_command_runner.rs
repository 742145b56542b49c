use std::{process::Stdio, time::Duration};

use tokio::process::Command;

use crate::provisioner::domain::model::enums::provisioner_domain_error::ProvisionerDomainError;

#[derive(Clone, Debug)]
pub struct ProcessCommandOutput {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Spawns `program` with an argument vector (never through a shell) and
/// kills it if it outlives `timeout`.
pub async fn run_bounded(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<ProcessCommandOutput, ProvisionerDomainError> {
    tracing::debug!(program, ?args, "spawning server control command");

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .kill_on_drop(true);

    let result = tokio::time::timeout(timeout, command.output()).await;

    match result {
        Ok(Ok(output)) => Ok(ProcessCommandOutput {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }),
        Ok(Err(error)) if error.kind() == std::io::ErrorKind::NotFound => {
            Err(ProvisionerDomainError::InfrastructureError(format!(
                "{program} not found; is the server tooling installed?"
            )))
        }
        Ok(Err(error)) => Err(ProvisionerDomainError::InfrastructureError(format!(
            "failed to execute {program}: {error}"
        ))),
        Err(_) => Err(ProvisionerDomainError::InfrastructureError(format!(
            "{program} did not finish within {}s",
            timeout.as_secs()
        ))),
    }
}
