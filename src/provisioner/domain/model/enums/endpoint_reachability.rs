#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EndpointReachability {
    AlreadyRunning,
    Started,
}

impl EndpointReachability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyRunning => "already_running",
            Self::Started => "started",
        }
    }
}
