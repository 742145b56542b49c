use async_trait::async_trait;

use crate::provisioner::domain::model::{
    enums::{catalog_change::CatalogChange, provisioner_domain_error::ProvisionerDomainError},
    value_objects::{
        owner_role_name::OwnerRoleName, principal_name::PrincipalName,
        provisioned_database_name::ProvisionedDatabaseName, server_endpoint::ServerEndpoint,
    },
};

/// Catalog lookups and DDL against one database server.
///
/// `open` binds the repository to an endpoint without connecting; the first
/// statement establishes the connection. `close` releases it and must be safe
/// to call whether or not anything was ever issued. The `create_*`,
/// `transfer_*` and `grant_*` methods report `CatalogChange::AlreadyPresent`
/// when the server rejects them because a concurrent caller got there first.
///
/// Owner authorization for one database runs between
/// `acquire_authorization_lock` and `release_authorization_lock`, so
/// concurrent provisioners never update the same catalog row at once.
#[async_trait]
pub trait DatabaseServerAdministrationRepository: Send + Sync {
    async fn open(&self, endpoint: &ServerEndpoint) -> Result<(), ProvisionerDomainError>;

    async fn ping(&self) -> Result<(), ProvisionerDomainError>;

    async fn database_exists(
        &self,
        database_name: &ProvisionedDatabaseName,
    ) -> Result<bool, ProvisionerDomainError>;

    async fn create_database(
        &self,
        database_name: &ProvisionedDatabaseName,
    ) -> Result<CatalogChange, ProvisionerDomainError>;

    async fn acquire_authorization_lock(
        &self,
        database_name: &ProvisionedDatabaseName,
    ) -> Result<(), ProvisionerDomainError>;

    async fn release_authorization_lock(
        &self,
        database_name: &ProvisionedDatabaseName,
    ) -> Result<(), ProvisionerDomainError>;

    async fn login_exists(&self, principal: &PrincipalName) -> Result<bool, ProvisionerDomainError>;

    async fn create_login(
        &self,
        principal: &PrincipalName,
    ) -> Result<CatalogChange, ProvisionerDomainError>;

    async fn database_user_exists(
        &self,
        database_name: &ProvisionedDatabaseName,
        principal: &PrincipalName,
    ) -> Result<bool, ProvisionerDomainError>;

    async fn create_database_user(
        &self,
        database_name: &ProvisionedDatabaseName,
        principal: &PrincipalName,
    ) -> Result<CatalogChange, ProvisionerDomainError>;

    async fn owner_role_exists(
        &self,
        owner_role: &OwnerRoleName,
    ) -> Result<bool, ProvisionerDomainError>;

    async fn create_owner_role(
        &self,
        owner_role: &OwnerRoleName,
    ) -> Result<CatalogChange, ProvisionerDomainError>;

    async fn database_owned_by(
        &self,
        database_name: &ProvisionedDatabaseName,
        owner_role: &OwnerRoleName,
    ) -> Result<bool, ProvisionerDomainError>;

    async fn transfer_database_ownership(
        &self,
        database_name: &ProvisionedDatabaseName,
        owner_role: &OwnerRoleName,
    ) -> Result<CatalogChange, ProvisionerDomainError>;

    async fn role_membership_exists(
        &self,
        owner_role: &OwnerRoleName,
        principal: &PrincipalName,
    ) -> Result<bool, ProvisionerDomainError>;

    async fn grant_role_membership(
        &self,
        owner_role: &OwnerRoleName,
        principal: &PrincipalName,
    ) -> Result<CatalogChange, ProvisionerDomainError>;

    async fn close(&self);
}
