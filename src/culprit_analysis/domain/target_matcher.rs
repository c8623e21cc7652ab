use super::PackageId;
use crate::shared::error::CulpritError;
use crate::shared::Result;

/// How a target pattern is compared against package identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Identifier starts with the pattern (a module path and its subpackages)
    #[default]
    Prefix,
    /// Identifier contains the pattern anywhere
    Substring,
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prefix" => Ok(MatchMode::Prefix),
            "substring" | "contains" => Ok(MatchMode::Substring),
            _ => Err(format!(
                "Invalid match mode: {}. Please specify 'prefix' or 'substring'",
                s
            )),
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Prefix => write!(f, "prefix"),
            MatchMode::Substring => write!(f, "substring"),
        }
    }
}

/// Value object deciding whether a package identifier is the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMatcher {
    pattern: String,
    mode: MatchMode,
}

impl TargetMatcher {
    /// Creates a matcher; an empty pattern would match every package and is rejected
    pub fn new(pattern: impl Into<String>, mode: MatchMode) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(CulpritError::Validation {
                message: "Target pattern cannot be empty".to_string(),
            }
            .into());
        }
        Ok(Self { pattern, mode })
    }

    pub fn prefix(pattern: impl Into<String>) -> Result<Self> {
        Self::new(pattern, MatchMode::Prefix)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn matches(&self, package: &PackageId) -> bool {
        match self.mode {
            MatchMode::Prefix => package.as_str().starts_with(&self.pattern),
            MatchMode::Substring => package.as_str().contains(&self.pattern),
        }
    }

    pub fn matches_any<'a, I>(&self, packages: I) -> bool
    where
        I: IntoIterator<Item = &'a PackageId>,
    {
        packages.into_iter().any(|p| self.matches(p))
    }
}
