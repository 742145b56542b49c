use crate::provisioner::domain::model::value_objects::provisioned_database_name::ProvisionedDatabaseName;

const OWNER_ROLE_SUFFIX: &str = "_owner";

/// Group role that owns a provisioned database. Principals become owners by
/// membership, so several principals can hold it at once.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct OwnerRoleName(String);

impl OwnerRoleName {
    pub fn for_database(database_name: &ProvisionedDatabaseName) -> Self {
        Self(format!("{}{OWNER_ROLE_SUFFIX}", database_name.value()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}
