#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProvisioningStep {
    Reachability,
    DatabaseCreation,
    AuthorizationGrant,
}

impl ProvisioningStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reachability => "reachability",
            Self::DatabaseCreation => "database_creation",
            Self::AuthorizationGrant => "authorization_grant",
        }
    }
}
