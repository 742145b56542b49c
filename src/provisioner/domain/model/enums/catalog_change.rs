/// Effect of a single ensure-style statement against the server catalog.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CatalogChange {
    Applied,
    AlreadyPresent,
}

impl CatalogChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::AlreadyPresent => "already_present",
        }
    }

    pub fn is_applied(&self) -> bool {
        *self == Self::Applied
    }
}
