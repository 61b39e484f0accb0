//! A single backend destination.

use url::Url;

/// One addressable backend inside a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Destination identifier, unique within its cluster.
    pub id: String,
    /// Base address requests are forwarded to.
    pub address: Url,
}

impl Destination {
    /// Create a destination from an already-parsed address.
    pub fn new(id: impl Into<String>, address: Url) -> Self {
        Self {
            id: id.into(),
            address,
        }
    }

    /// Parse `address` and create a destination.
    pub fn parse(id: impl Into<String>, address: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(id, Url::parse(address)?))
    }
}
