use crate::provisioner::domain::model::enums::{
    authorization_grant_outcome::AuthorizationGrantOutcome, catalog_change::CatalogChange,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AuthorizationGrantReport {
    pub login: CatalogChange,
    pub database_user: CatalogChange,
    pub owner_role: CatalogChange,
    pub database_ownership: CatalogChange,
    pub role_membership: CatalogChange,
}

impl AuthorizationGrantReport {
    pub fn outcome(&self) -> AuthorizationGrantOutcome {
        let changed = [
            self.login,
            self.database_user,
            self.owner_role,
            self.database_ownership,
            self.role_membership,
        ]
        .iter()
        .any(CatalogChange::is_applied);

        if changed {
            AuthorizationGrantOutcome::Granted
        } else {
            AuthorizationGrantOutcome::AlreadyGranted
        }
    }
}
