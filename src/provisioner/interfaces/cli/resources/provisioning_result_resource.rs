use serde::{Deserialize, Serialize};

use crate::provisioner::domain::model::entities::provisioning_result::ProvisioningResult;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthorizationDetailResource {
    pub login: String,
    pub database_user: String,
    pub owner_role: String,
    pub database_ownership: String,
    pub role_membership: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvisioningResultResource {
    pub endpoint: String,
    pub database_name: String,
    pub principal: String,
    pub owner_role: String,
    pub reachability: String,
    pub database: String,
    pub authorization: String,
    pub authorization_detail: AuthorizationDetailResource,
    pub changed: bool,
    pub completed_at: String,
}

impl From<&ProvisioningResult> for ProvisioningResultResource {
    fn from(result: &ProvisioningResult) -> Self {
        let report = result.authorization_report();

        Self {
            endpoint: result.endpoint().to_string(),
            database_name: result.database_name().value().to_string(),
            principal: result.principal().value().to_string(),
            owner_role: result.owner_role().value().to_string(),
            reachability: result.reachability().as_str().to_string(),
            database: result.database().as_str().to_string(),
            authorization: result.authorization().as_str().to_string(),
            authorization_detail: AuthorizationDetailResource {
                login: report.login.as_str().to_string(),
                database_user: report.database_user.as_str().to_string(),
                owner_role: report.owner_role.as_str().to_string(),
                database_ownership: report.database_ownership.as_str().to_string(),
                role_membership: report.role_membership.as_str().to_string(),
            },
            changed: !result.is_no_op(),
            completed_at: result.completed_at().to_rfc3339(),
        }
    }
}

impl ProvisioningResultResource {
    /// Summary printed after the per-step progress lines.
    pub fn render_text(&self) -> Vec<String> {
        let detail = &self.authorization_detail;
        let changes = if self.changed {
            "changes applied"
        } else {
            "nothing to change"
        };

        vec![
            format!(
                "owner access for {} via {}: login {}, owner role {}, ownership {}, database user {}, membership {}",
                self.principal,
                self.owner_role,
                detail.login,
                detail.owner_role,
                detail.database_ownership,
                detail.database_user,
                detail.role_membership
            ),
            format!(
                "database {} on {} is ready ({changes})",
                self.database_name, self.endpoint
            ),
        ]
    }
}
