use regex::Regex;

use crate::provisioner::domain::model::enums::provisioner_domain_error::ProvisionerDomainError;

lazy_static::lazy_static! {
    static ref DATABASE_NAME_REGEX: Regex =
        Regex::new(r"^[a-z_][a-z0-9_]{0,56}$").expect("valid regex");
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ProvisionedDatabaseName(String);

impl ProvisionedDatabaseName {
    pub fn new(value: String) -> Result<Self, ProvisionerDomainError> {
        let normalized = value.trim().to_lowercase();

        if !DATABASE_NAME_REGEX.is_match(&normalized) {
            return Err(ProvisionerDomainError::InvalidDatabaseName);
        }

        Ok(Self(normalized))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}
