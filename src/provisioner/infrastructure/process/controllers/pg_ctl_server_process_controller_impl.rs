use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use async_trait::async_trait;

use crate::provisioner::{
    domain::model::enums::provisioner_domain_error::ProvisionerDomainError,
    infrastructure::process::{
        process_command_runner::run_bounded, server_process_controller::ServerProcessController,
    },
};

const PG_CTL_NOT_RUNNING: i32 = 3;
const PG_CTL_MIN_WAIT_SECONDS: u64 = 1;

/// Drives a cluster through `pg_ctl` against its data directory.
pub struct PgCtlServerProcessControllerImpl {
    data_directory: PathBuf,
    log_file: PathBuf,
    command_timeout: Duration,
}

impl PgCtlServerProcessControllerImpl {
    pub fn new(data_directory: PathBuf, log_file: PathBuf, command_timeout: Duration) -> Self {
        Self {
            data_directory,
            log_file,
            command_timeout,
        }
    }

    /// Server output goes here, outside the cluster's data directory.
    pub fn default_log_file() -> PathBuf {
        std::env::temp_dir().join("devdb-provisioner-pg_ctl.log")
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    fn data_directory_arg(&self) -> String {
        self.data_directory.to_string_lossy().into_owned()
    }
}

#[async_trait]
impl ServerProcessController for PgCtlServerProcessControllerImpl {
    fn describe(&self) -> String {
        format!("pg_ctl cluster at {}", self.data_directory.display())
    }

    async fn is_running(&self) -> Result<bool, ProvisionerDomainError> {
        let data_directory = self.data_directory_arg();
        let output = run_bounded(
            "pg_ctl",
            &["status", "-D", &data_directory],
            self.command_timeout,
        )
        .await?;

        match output.exit_code {
            0 => Ok(true),
            PG_CTL_NOT_RUNNING => Ok(false),
            code => Err(ProvisionerDomainError::InfrastructureError(format!(
                "pg_ctl status failed (exit {code}): {}",
                output.stderr
            ))),
        }
    }

    async fn start(&self, timeout: Duration) -> Result<(), ProvisionerDomainError> {
        tracing::info!(
            data_directory = %self.data_directory.display(),
            log_file = %self.log_file.display(),
            "starting database server with pg_ctl"
        );

        let data_directory = self.data_directory_arg();
        // The server must not inherit our pipes or `output()` never returns.
        let log_file = self.log_file.to_string_lossy().into_owned();
        let wait_seconds = timeout.as_secs().max(PG_CTL_MIN_WAIT_SECONDS).to_string();

        let output = run_bounded(
            "pg_ctl",
            &[
                "start",
                "-D",
                &data_directory,
                "-l",
                &log_file,
                "-w",
                "-t",
                &wait_seconds,
            ],
            timeout,
        )
        .await?;

        if !output.success {
            let detail = if output.stderr.is_empty() {
                output.stdout
            } else {
                output.stderr
            };
            return Err(ProvisionerDomainError::InfrastructureError(format!(
                "pg_ctl start failed (exit {}): {detail}",
                output.exit_code
            )));
        }

        Ok(())
    }
}
