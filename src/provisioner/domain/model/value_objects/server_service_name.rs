use crate::provisioner::domain::model::enums::provisioner_domain_error::ProvisionerDomainError;

/// Name of the service unit that runs the database server. Restricted to a
/// safe character set because it is handed to an external process.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerServiceName(String);

impl ServerServiceName {
    pub fn new(value: String) -> Result<Self, ProvisionerDomainError> {
        let trimmed = value.trim();

        let is_safe = !trimmed.is_empty()
            && trimmed.len() <= 128
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'));

        if !is_safe {
            return Err(ProvisionerDomainError::InvalidServiceName);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}
