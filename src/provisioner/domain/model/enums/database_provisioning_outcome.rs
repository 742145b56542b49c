#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DatabaseProvisioningOutcome {
    Created,
    AlreadyExists,
}

impl DatabaseProvisioningOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::AlreadyExists => "already_exists",
        }
    }
}
