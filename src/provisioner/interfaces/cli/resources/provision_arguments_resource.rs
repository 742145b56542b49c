use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use validator::Validate;

use crate::config::app_config::{AppConfig, ServerControlMode};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormatResource {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ServerControlResource {
    None,
    Systemctl,
    #[value(name = "pg_ctl")]
    PgCtl,
}

impl From<ServerControlResource> for ServerControlMode {
    fn from(value: ServerControlResource) -> Self {
        match value {
            ServerControlResource::None => Self::None,
            ServerControlResource::Systemctl => Self::Systemctl,
            ServerControlResource::PgCtl => Self::PgCtl,
        }
    }
}

/// Ensure a local PostgreSQL server, the application database and owner
/// access for the invoking principal exist. Safe to run repeatedly.
///
/// Unset flags fall back to the environment (and `.env`), then to built-in
/// defaults.
#[derive(Debug, Clone, Parser, Validate)]
#[command(name = "devdb-provisioner", version, long_about = None)]
pub struct ProvisionArgumentsResource {
    /// Database server host [env: POSTGRES_HOST, default: 127.0.0.1]
    #[arg(long)]
    #[validate(length(min = 1, max = 255))]
    pub host: Option<String>,

    /// Database server port [env: POSTGRES_PORT, default: 5432]
    #[arg(long)]
    #[validate(range(min = 1))]
    pub port: Option<u16>,

    /// Database to ensure [env: PROVISIONER_DATABASE]
    #[arg(long)]
    #[validate(length(min = 1, max = 57))]
    pub database: Option<String>,

    /// Principal to authorize as owner [env: PROVISIONER_PRINCIPAL, default: current user]
    #[arg(long)]
    #[validate(length(min = 1, max = 63))]
    pub principal: Option<String>,

    /// How to start a stopped server [env: PROVISIONER_SERVER_CONTROL, default: none]
    #[arg(long, value_enum)]
    pub server_control: Option<ServerControlResource>,

    /// Service unit used with systemctl [env: PROVISIONER_SERVICE_NAME]
    #[arg(long)]
    #[validate(length(min = 1, max = 128))]
    pub service_name: Option<String>,

    /// Cluster data directory used with pg_ctl [env: PROVISIONER_PG_DATA]
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Seconds to wait for a started server to accept connections
    #[arg(long)]
    #[validate(range(min = 1, max = 600))]
    pub startup_timeout_secs: Option<u64>,

    /// Append issued statements to this file [env: PROVISIONER_TRANSCRIPT_PATH]
    #[arg(long)]
    pub transcript: Option<PathBuf>,

    /// Output format for the result
    #[arg(long, value_enum, default_value_t = OutputFormatResource::Text)]
    pub format: OutputFormatResource,
}

impl ProvisionArgumentsResource {
    pub fn into_config(self, base: AppConfig) -> AppConfig {
        AppConfig {
            postgres_host: self.host.unwrap_or(base.postgres_host),
            postgres_port: self.port.unwrap_or(base.postgres_port),
            database_name: self.database.unwrap_or(base.database_name),
            principal: self.principal.unwrap_or(base.principal),
            server_control: self
                .server_control
                .map(ServerControlMode::from)
                .unwrap_or(base.server_control),
            service_name: self.service_name.unwrap_or(base.service_name),
            data_directory: self.data_dir.or(base.data_directory),
            startup_timeout: self
                .startup_timeout_secs
                .map(std::time::Duration::from_secs)
                .unwrap_or(base.startup_timeout),
            transcript_path: self.transcript.or(base.transcript_path),
            ..base
        }
    }
}
