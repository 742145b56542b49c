use crate::provisioner::domain::model::{
    enums::provisioner_domain_error::ProvisionerDomainError,
    value_objects::{
        owner_role_name::OwnerRoleName, principal_name::PrincipalName,
        provisioned_database_name::ProvisionedDatabaseName, server_endpoint::ServerEndpoint,
    },
};

#[derive(Clone, Debug)]
pub struct ProvisionDatabaseCommand {
    endpoint: ServerEndpoint,
    database_name: ProvisionedDatabaseName,
    principal: PrincipalName,
    owner_role: OwnerRoleName,
}

impl ProvisionDatabaseCommand {
    pub fn new(
        host: String,
        port: u16,
        database_name: String,
        principal: String,
    ) -> Result<Self, ProvisionerDomainError> {
        let database_name = ProvisionedDatabaseName::new(database_name)?;
        let owner_role = OwnerRoleName::for_database(&database_name);

        Ok(Self {
            endpoint: ServerEndpoint::new(host, port)?,
            database_name,
            principal: PrincipalName::new(principal)?,
            owner_role,
        })
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
}
