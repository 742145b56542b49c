use regex::Regex;

use crate::provisioner::domain::model::enums::provisioner_domain_error::ProvisionerDomainError;

lazy_static::lazy_static! {
    static ref PRINCIPAL_NAME_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.@-]{0,62}$").expect("valid regex");
}

/// Operator identity that ends up as a login role. Case is preserved because
/// the role is always addressed as a quoted identifier.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PrincipalName(String);

impl PrincipalName {
    pub fn new(value: String) -> Result<Self, ProvisionerDomainError> {
        let trimmed = value.trim();

        if !PRINCIPAL_NAME_REGEX.is_match(trimmed) {
            return Err(ProvisionerDomainError::InvalidPrincipalName);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}
