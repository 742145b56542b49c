use std::{path::PathBuf, str::FromStr, time::Duration};

pub const DEFAULT_DATABASE_NAME: &str = "webapp_development";
pub const DEFAULT_SERVICE_NAME: &str = "postgresql";

/// How the provisioner may bring a stopped server up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ServerControlMode {
    None,
    Systemctl,
    PgCtl,
}

impl ServerControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Systemctl => "systemctl",
            Self::PgCtl => "pg_ctl",
        }
    }
}

impl FromStr for ServerControlMode {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "systemctl" | "systemd" => Ok(Self::Systemctl),
            "pg_ctl" | "pgctl" => Ok(Self::PgCtl),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Full admin connection URL; when set it replaces user, password and
    /// admin database. Host and port still come from the endpoint.
    pub postgres_admin_url: Option<String>,
    pub postgres_host: String,
    pub postgres_port: u16,
    pub postgres_user: String,
    pub postgres_password: String,
    pub postgres_admin_database: String,
    pub database_name: String,
    pub principal: String,
    pub server_control: ServerControlMode,
    pub service_name: String,
    pub data_directory: Option<PathBuf>,
    pub pg_ctl_log_path: Option<PathBuf>,
    pub startup_timeout: Duration,
    pub connect_timeout: Duration,
    pub transcript_path: Option<PathBuf>,
}

impl AppConfig {
    /// Reads every ambient input once, up front. Nothing downstream looks at
    /// the process environment again.
    pub fn from_env() -> Self {
        Self {
            postgres_admin_url: std::env::var("POSTGRES_ADMIN_URL")
                .ok()
                .filter(|value| !value.trim().is_empty()),
            postgres_host: std::env::var("POSTGRES_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            postgres_port: std::env::var("POSTGRES_PORT")
                .unwrap_or_else(|_| "5432".to_string())
                .parse()
                .unwrap_or(5432),
            postgres_user: std::env::var("POSTGRES_USER")
                .unwrap_or_else(|_| "postgres".to_string()),
            postgres_password: std::env::var("POSTGRES_PASSWORD").unwrap_or_default(),
            postgres_admin_database: std::env::var("POSTGRES_ADMIN_DATABASE")
                .unwrap_or_else(|_| "postgres".to_string()),
            database_name: std::env::var("PROVISIONER_DATABASE")
                .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string()),
            principal: std::env::var("PROVISIONER_PRINCIPAL")
                .or_else(|_| std::env::var("USER"))
                .or_else(|_| std::env::var("USERNAME"))
                .unwrap_or_default(),
            server_control: std::env::var("PROVISIONER_SERVER_CONTROL")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(ServerControlMode::None),
            service_name: std::env::var("PROVISIONER_SERVICE_NAME")
                .unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string()),
            data_directory: std::env::var("PROVISIONER_PG_DATA")
                .or_else(|_| std::env::var("PGDATA"))
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            pg_ctl_log_path: std::env::var("PROVISIONER_PG_CTL_LOG")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            startup_timeout: Duration::from_secs(
                std::env::var("PROVISIONER_STARTUP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(10),
            ),
            connect_timeout: Duration::from_secs(
                std::env::var("PROVISIONER_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(3),
            ),
            transcript_path: std::env::var("PROVISIONER_TRANSCRIPT_PATH")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}
