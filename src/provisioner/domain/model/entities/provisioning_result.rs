use chrono::{DateTime, Utc};

use crate::provisioner::domain::model::{
    entities::authorization_grant_report::AuthorizationGrantReport,
    enums::{
        authorization_grant_outcome::AuthorizationGrantOutcome,
        database_provisioning_outcome::DatabaseProvisioningOutcome,
        endpoint_reachability::EndpointReachability,
    },
    value_objects::{
        owner_role_name::OwnerRoleName, principal_name::PrincipalName,
        provisioned_database_name::ProvisionedDatabaseName, server_endpoint::ServerEndpoint,
    },
};

/// Outcome of one successful provisioning run. Failed runs never produce a
/// result; they surface as a `ProvisionerDomainError` naming the step.
#[derive(Clone, Debug)]
pub struct ProvisioningResult {
    endpoint: ServerEndpoint,
    database_name: ProvisionedDatabaseName,
    principal: PrincipalName,
    owner_role: OwnerRoleName,
    reachability: EndpointReachability,
    database: DatabaseProvisioningOutcome,
    authorization: AuthorizationGrantReport,
    completed_at: DateTime<Utc>,
}

impl ProvisioningResult {
    pub fn new(
        endpoint: ServerEndpoint,
        database_name: ProvisionedDatabaseName,
        principal: PrincipalName,
        owner_role: OwnerRoleName,
        reachability: EndpointReachability,
        database: DatabaseProvisioningOutcome,
        authorization: AuthorizationGrantReport,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            endpoint,
            database_name,
            principal,
            owner_role,
            reachability,
            database,
            authorization,
            completed_at,
        }
    }

    pub fn endpoint(&self) -> &ServerEndpoint {
        &self.endpoint
    }

    pub fn database_name(&self) -> &ProvisionedDatabaseName {
        &self.database_name
    }

    pub fn principal(&self) -> &PrincipalName {
        &self.principal
    }

    pub fn owner_role(&self) -> &OwnerRoleName {
        &self.owner_role
    }

    pub fn reachability(&self) -> EndpointReachability {
        self.reachability
    }

    pub fn database(&self) -> DatabaseProvisioningOutcome {
        self.database
    }

    pub fn authorization(&self) -> AuthorizationGrantOutcome {
        self.authorization.outcome()
    }

    pub fn authorization_report(&self) -> &AuthorizationGrantReport {
        &self.authorization
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// True when the run left the server exactly as it found it.
    pub fn is_no_op(&self) -> bool {
        self.reachability == EndpointReachability::AlreadyRunning
            && self.database == DatabaseProvisioningOutcome::AlreadyExists
            && self.authorization() == AuthorizationGrantOutcome::AlreadyGranted
    }
}
