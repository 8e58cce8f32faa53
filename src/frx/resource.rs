use serde::Serialize;

/// The two record shapes an FRX container holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Size-prefixed byte blob (pictures, icons, long text)
    Binary,
    /// Count-prefixed list of strings (`List` of a ListBox/ComboBox)
    List,
}

/// A resource read out of an FRX container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Resource {
    Binary(Vec<u8>),
    List(Vec<String>),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Binary(_) => ResourceKind::Binary,
            Resource::List(_) => ResourceKind::List,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Resource::Binary(data) => Some(data),
            Resource::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Resource::List(items) => Some(items),
            Resource::Binary(_) => None,
        }
    }
}
