use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Parser};
use dep_culprit::application::dto::{GraphSource, OutputFormat};
use dep_culprit::culprit_analysis::domain::MatchMode;
use std::path::PathBuf;

/// Find which import chains pull a target package into a root package
#[derive(Parser, Debug)]
#[command(name = "dep-culprit")]
#[command(version)]
#[command(
    about = "Find the import chains that pull a target package into a root package",
    long_about = None
)]
pub struct Args {
    /// Root package whose dependency graph is searched
    #[arg(value_name = "ROOT")]
    pub root: String,

    /// Target package (or package prefix) to look for
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Use the saved snapshot instead of querying the provider
    #[arg(long, conflicts_with = "rebuild")]
    pub cached: bool,

    /// Rebuild the graph from the provider even if a snapshot exists
    #[arg(long)]
    pub rebuild: bool,

    /// Snapshot file location [default: .dep-culprit/graph.json]
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Do not save the snapshot after rebuilding
    #[arg(long)]
    pub no_save: bool,

    /// Rebuild from the provider when the cached snapshot cannot be used
    #[arg(long)]
    pub fallback_rebuild: bool,

    /// How TARGET is compared with package identifiers: prefix or substring
    #[arg(long = "match", value_name = "MODE")]
    pub match_mode: Option<MatchMode>,

    /// Output format: text or json
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum number of concurrent provider queries
    #[arg(long, value_name = "N", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub concurrency: Option<usize>,

    /// Timeout for a single provider query, in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Retries for a failed provider query
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(..=10))]
    pub retries: Option<u32>,

    /// Path to the go binary
    #[arg(long, value_name = "PATH")]
    pub go: Option<PathBuf>,

    /// Directory the provider runs in (defaults to current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Explicit config file (otherwise dep-culprit.config.yml is discovered)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn graph_source(&self) -> GraphSource {
        if self.rebuild {
            GraphSource::Rebuild
        } else if self.cached {
            GraphSource::Cached
        } else {
            GraphSource::Auto
        }
    }

    /// Tracing filter directive for the `-v` count
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
