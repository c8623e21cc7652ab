//! dep-culprit - find the import chains that pull a package into a build
//!
//! Given a root package and a target, this library builds (or loads) the
//! transitive dependency graph of the root and reports every import chain
//! through which the root ends up depending on the target.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`culprit_analysis`): graph store, culprit search and graph building
//! - **Application Layer** (`application`): Use cases, DTOs and adapter factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use dep_culprit::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! let use_case = FindCulpritsUseCase::new(
//!     GoListProvider::new(),
//!     JsonSnapshotRepository::new(),
//!     StderrProgressReporter::new(),
//!     BuildOptions::default(),
//! );
//!
//! let request = CulpritRequest::new(
//!     PackageId::new("example.com/app")?,
//!     TargetMatcher::prefix("example.com/legacy")?,
//!     PathBuf::from(".dep-culprit/graph.json"),
//! );
//! let response = use_case.execute(request).await?;
//!
//! let output = TextFormatter::new().format(&response.report)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod culprit_analysis;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, JsonSnapshotRepository, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::provider::GoListProvider;
    pub use crate::application::dto::{
        CulpritRequest, CulpritResponse, GraphOrigin, GraphSource, OutputFormat,
    };
    pub use crate::application::use_cases::FindCulpritsUseCase;
    pub use crate::culprit_analysis::domain::{
        CulpritChain, CulpritReport, DependencyRecord, GraphStore, MatchMode, PackageId,
        TargetMatcher,
    };
    pub use crate::culprit_analysis::services::{BuildOptions, CulpritFinder, GraphBuilder};
    pub use crate::ports::inbound::CulpritAnalysisPort;
    pub use crate::ports::outbound::{
        GraphProvider, OutputPresenter, ProgressReporter, ReportFormatter, SnapshotRepository,
    };
    pub use crate::shared::error::{CulpritError, ExitCode};
    pub use crate::shared::Result;
}
