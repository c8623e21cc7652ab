use crate::shared::error::CulpritError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// Maximum length for package identifiers (security limit)
const MAX_PACKAGE_ID_LENGTH: usize = 1024;

/// NewType wrapper for an opaque package identifier (an import path such as
/// `github.com/acme/widgets/pkg/client`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    fn validate(id: &str) -> std::result::Result<(), CulpritError> {
        let reason = if id.is_empty() {
            Some("Package identifier cannot be empty".to_string())
        } else if id.len() > MAX_PACKAGE_ID_LENGTH {
            Some(format!(
                "Package identifier is too long ({} bytes). Maximum allowed: {} bytes",
                id.len(),
                MAX_PACKAGE_ID_LENGTH
            ))
        } else if id.chars().any(|c| c.is_whitespace() || c.is_control()) {
            Some("Package identifier contains whitespace or control characters".to_string())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CulpritError::InvalidPackageId {
                value: id.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PackageId {
    type Error = CulpritError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::validate(&value)?;
        Ok(Self(value))
    }
}

impl From<PackageId> for String {
    fn from(id: PackageId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::borrow::Borrow<str> for PackageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
