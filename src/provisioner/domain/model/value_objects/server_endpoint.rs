use std::fmt;

use crate::provisioner::domain::model::enums::provisioner_domain_error::ProvisionerDomainError;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ServerEndpoint {
    host: String,
    port: u16,
}

impl ServerEndpoint {
    pub fn new(host: String, port: u16) -> Result<Self, ProvisionerDomainError> {
        let trimmed = host.trim();

        if trimmed.is_empty() || trimmed.contains(char::is_whitespace) || port == 0 {
            return Err(ProvisionerDomainError::InvalidEndpoint);
        }

        Ok(Self {
            host: trimmed.to_string(),
            port,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
