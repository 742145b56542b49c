use thiserror::Error;

use crate::provisioner::domain::model::enums::provisioning_step::ProvisioningStep;

#[derive(Debug, Error)]
pub enum ProvisionerDomainError {
    #[error("database name is invalid; use [a-z_][a-z0-9_] and length 1..57")]
    InvalidDatabaseName,

    #[error("principal name is invalid; use [A-Za-z0-9_.@-] and length 1..63")]
    InvalidPrincipalName,

    #[error("server endpoint is invalid; host must be non-empty and port non-zero")]
    InvalidEndpoint,

    #[error("server service name is invalid; use [A-Za-z0-9._@-] and length 1..128")]
    InvalidServiceName,

    #[error("pg_ctl server control requires a data directory (PROVISIONER_PG_DATA)")]
    MissingDataDirectory,

    #[error("database server unreachable: {0}")]
    EndpointUnreachable(String),

    #[error("database creation failed: {0}")]
    CreateFailed(String),

    #[error("authorization grant failed: {0}")]
    GrantFailed(String),

    #[error("infrastructure error: {0}")]
    InfrastructureError(String),
}

impl ProvisionerDomainError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidDatabaseName
                | Self::InvalidPrincipalName
                | Self::InvalidEndpoint
                | Self::InvalidServiceName
                | Self::MissingDataDirectory
        )
    }

    pub fn failed_step(&self) -> Option<ProvisioningStep> {
        match self {
            Self::EndpointUnreachable(_) => Some(ProvisioningStep::Reachability),
            Self::CreateFailed(_) => Some(ProvisioningStep::DatabaseCreation),
            Self::GrantFailed(_) => Some(ProvisioningStep::AuthorizationGrant),
            _ => None,
        }
    }

    /// Server or adapter message without the variant prefix.
    pub fn reason(&self) -> String {
        match self {
            Self::EndpointUnreachable(reason)
            | Self::CreateFailed(reason)
            | Self::GrantFailed(reason)
            | Self::InfrastructureError(reason) => reason.clone(),
            other => other.to_string(),
        }
    }
}
