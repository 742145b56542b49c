#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthorizationGrantOutcome {
    Granted,
    AlreadyGranted,
}

impl AuthorizationGrantOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::AlreadyGranted => "already_granted",
        }
    }
}
