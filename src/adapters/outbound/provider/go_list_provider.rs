use crate::culprit_analysis::domain::{DependencyRecord, PackageId};
use crate::ports::outbound::GraphProvider;
use crate::shared::error::CulpritError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::trace;

/// The cgo pseudo-package; it appears in import lists but cannot be listed
const CGO_PSEUDO_PACKAGE: &str = "C";

/// Maximum amount of stderr carried into an error message (bytes)
const MAX_STDERR_EXCERPT: usize = 2000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoListPackage {
    import_path: String,
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    deps: Vec<String>,
    #[serde(default)]
    error: Option<GoListError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoListError {
    err: String,
}

/// GoListProvider adapter answering graph queries with `go list -json`
///
/// Each `describe` spawns `go list -json <package>` in the configured
/// working directory (module context matters for resolution) and reads the
/// `Imports` and `Deps` fields. The child is killed if the caller's timeout
/// drops the query.
pub struct GoListProvider {
    go_binary: PathBuf,
    working_dir: Option<PathBuf>,
}

impl GoListProvider {
    pub fn new() -> Self {
        Self {
            go_binary: PathBuf::from("go"),
            working_dir: None,
        }
    }

    pub fn with_go_binary(mut self, go_binary: impl Into<PathBuf>) -> Self {
        self.go_binary = go_binary.into();
        self
    }

    pub fn with_working_dir(mut self, working_dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(working_dir.into());
        self
    }

    /// Rejects identifiers the go tool would read as flags
    fn validate_package_arg(package: &PackageId) -> Result<()> {
        if package.as_str().starts_with('-') {
            return Err(CulpritError::provider(
                package.as_str(),
                "Security: package identifier starts with '-' and would be parsed as a flag",
            )
            .into());
        }
        Ok(())
    }

    fn command(&self, package: &PackageId) -> Command {
        let mut command = Command::new(&self.go_binary);
        command
            .arg("list")
            .arg("-json")
            .arg(package.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }

    /// Converts `go list -json` output into a dependency record
    fn parse_output(package: &PackageId, stdout: &[u8]) -> Result<DependencyRecord> {
        let listed: GoListPackage = serde_json::from_slice(stdout).map_err(|e| {
            CulpritError::provider(package.as_str(), format!("Failed to parse go list output: {}", e))
        })?;

        if let Some(error) = listed.error {
            return Err(CulpritError::provider(package.as_str(), error.err).into());
        }

        let to_ids = |paths: Vec<String>| -> Result<Vec<PackageId>> {
            paths
                .into_iter()
                .filter(|p| p != CGO_PSEUDO_PACKAGE && p != &listed.import_path)
                .map(|p| {
                    PackageId::new(p).map_err(|e| {
                        anyhow::Error::from(CulpritError::provider(package.as_str(), e))
                    })
                })
                .collect()
        };

        let imports = to_ids(listed.imports)?;
        let transitive_deps: BTreeSet<PackageId> = to_ids(listed.deps)?.into_iter().collect();

        Ok(DependencyRecord::new(imports, transitive_deps))
    }

    fn stderr_excerpt(stderr: &[u8]) -> String {
        let text = String::from_utf8_lossy(stderr);
        let text = text.trim();
        if text.len() <= MAX_STDERR_EXCERPT {
            return text.to_string();
        }
        let mut end = MAX_STDERR_EXCERPT;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}

impl Default for GoListProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphProvider for GoListProvider {
    async fn describe(&self, package: &PackageId) -> Result<DependencyRecord> {
        Self::validate_package_arg(package)?;
        trace!(package = %package, go = %self.go_binary.display(), "running go list");

        let output = self.command(package).output().await.map_err(|e| {
            CulpritError::provider(
                package.as_str(),
                format!("Failed to run {}: {}", self.go_binary.display(), e),
            )
        })?;

        if !output.status.success() {
            return Err(CulpritError::provider(
                package.as_str(),
                format!(
                    "go list exited with {}: {}",
                    output.status,
                    Self::stderr_excerpt(&output.stderr)
                ),
            )
            .into());
        }

        Self::parse_output(package, &output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PackageId {
        PackageId::new(s).unwrap()
    }

    #[test]
    fn test_parse_output_imports_and_deps() {
        let stdout = br#"{
            "Dir": "/src/acme/server",
            "ImportPath": "github.com/acme/server",
            "Name": "server",
            "Imports": ["fmt", "github.com/acme/client", "net/http"],
            "Deps": ["errors", "fmt", "github.com/acme/client", "k8s.io/client-go/rest", "net/http"]
        }"#;

        let record = GoListProvider::parse_output(&id("github.com/acme/server"), stdout).unwrap();

        assert_eq!(
            record.imports,
            vec![id("fmt"), id("github.com/acme/client"), id("net/http")]
        );
        assert_eq!(record.transitive_deps.len(), 5);
        assert!(record.transitive_deps.contains(&id("k8s.io/client-go/rest")));
    }

    #[test]
    fn test_parse_output_leaf_package() {
        let stdout = br#"{"ImportPath": "errors", "Standard": true}"#;
        let record = GoListProvider::parse_output(&id("errors"), stdout).unwrap();
        assert_eq!(record, DependencyRecord::leaf());
    }

    #[test]
    fn test_parse_output_skips_cgo_and_self() {
        let stdout = br#"{
            "ImportPath": "github.com/acme/native",
            "Imports": ["C", "unsafe"],
            "Deps": ["C", "github.com/acme/native", "unsafe"]
        }"#;

        let record = GoListProvider::parse_output(&id("github.com/acme/native"), stdout).unwrap();
        assert_eq!(record.imports, vec![id("unsafe")]);
        assert_eq!(record.transitive_deps.len(), 1);
    }

    #[test]
    fn test_parse_output_reports_package_error() {
        let stdout = br#"{
            "ImportPath": "github.com/acme/missing",
            "Error": {"Err": "cannot find module providing package github.com/acme/missing"}
        }"#;

        let err = GoListProvider::parse_output(&id("github.com/acme/missing"), stdout).unwrap_err();
        match err.downcast_ref::<CulpritError>() {
            Some(CulpritError::Provider { package, details }) => {
                assert_eq!(package, "github.com/acme/missing");
                assert!(details.contains("cannot find module"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_output_invalid_json() {
        let err = GoListProvider::parse_output(&id("pkg"), b"not json").unwrap_err();
        assert!(err.to_string().contains("Failed to parse go list output"));
    }

    #[test]
    fn test_validate_package_arg_rejects_flags() {
        assert!(GoListProvider::validate_package_arg(&id("-toolexec=/bin/sh")).is_err());
        assert!(GoListProvider::validate_package_arg(&id("github.com/acme/x")).is_ok());
    }

    #[test]
    fn test_stderr_excerpt_truncates() {
        let long = "x".repeat(MAX_STDERR_EXCERPT + 50);
        let excerpt = GoListProvider::stderr_excerpt(long.as_bytes());
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.len(), MAX_STDERR_EXCERPT + 3);
    }

    #[tokio::test]
    async fn test_describe_missing_go_binary_is_provider_error() {
        let provider = GoListProvider::new().with_go_binary("/nonexistent/bin/go");
        let err = provider.describe(&id("github.com/acme/x")).await.unwrap_err();
        match err.downcast_ref::<CulpritError>() {
            Some(CulpritError::Provider { package, details }) => {
                assert_eq!(package, "github.com/acme/x");
                assert!(details.contains("Failed to run"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
