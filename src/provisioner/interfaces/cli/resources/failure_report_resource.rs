use serde::{Deserialize, Serialize};

use crate::provisioner::{
    domain::model::enums::provisioner_domain_error::ProvisionerDomainError,
    interfaces::cli::resources::completed_step_resource::CompletedStepResource,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FailureReportResource {
    pub step: Option<String>,
    pub message: String,
    pub remediation: Option<String>,
    #[serde(default)]
    pub completed_steps: Vec<CompletedStepResource>,
}

impl FailureReportResource {
    pub fn from_error(error: &ProvisionerDomainError) -> Self {
        Self {
            step: error.failed_step().map(|step| step.as_str().to_string()),
            message: error.to_string(),
            remediation: remediation_for(error).map(str::to_string),
            completed_steps: Vec::new(),
        }
    }

    /// Steps that finished before the failure, e.g. a database that was
    /// created before the grant failed.
    pub fn with_completed_steps(mut self, completed_steps: Vec<CompletedStepResource>) -> Self {
        self.completed_steps = completed_steps;
        self
    }

    pub fn render_text(&self) -> Vec<String> {
        let mut lines = match &self.step {
            Some(step) => vec![format!("[failed] {step}: {}", self.message)],
            None => vec![format!("[failed] {}", self.message)],
        };

        if let Some(remediation) = &self.remediation {
            lines.push(format!("hint: {remediation}"));
        }

        lines
    }
}

fn remediation_for(error: &ProvisionerDomainError) -> Option<&'static str> {
    let reason = error.reason().to_lowercase();
    let permission_denied = reason.contains("permission denied") || reason.contains("must have");

    match error {
        ProvisionerDomainError::EndpointUnreachable(_) if reason.contains("not found") => Some(
            "server not installed: install PostgreSQL or point --host/--port at a running server",
        ),
        ProvisionerDomainError::EndpointUnreachable(_) if reason.contains("not managed") => Some(
            "start the server yourself, or pass --server-control systemctl|pg_ctl so it can be started",
        ),
        ProvisionerDomainError::EndpointUnreachable(_) => Some(
            "check that the server is running on the endpoint and that POSTGRES_USER/POSTGRES_PASSWORD are valid",
        ),
        ProvisionerDomainError::CreateFailed(_) if permission_denied => Some(
            "insufficient privilege to create databases: connect as a role with CREATEDB (POSTGRES_USER)",
        ),
        ProvisionerDomainError::CreateFailed(_) => {
            Some("check the server log and available disk space")
        }
        ProvisionerDomainError::GrantFailed(_) if permission_denied => Some(
            "insufficient privilege to create login: connect as a superuser or a role with CREATEROLE (POSTGRES_USER)",
        ),
        ProvisionerDomainError::GrantFailed(_) => Some("check the server log"),
        ProvisionerDomainError::MissingDataDirectory => {
            Some("pass --data-dir or set PROVISIONER_PG_DATA")
        }
        other if other.is_invalid_input() => Some("fix the argument and run again"),
        _ => None,
    }
}
