mod cli;

use clap::Parser;
use cli::Args;
use dep_culprit::adapters::outbound::console::StderrProgressReporter;
use dep_culprit::adapters::outbound::filesystem::JsonSnapshotRepository;
use dep_culprit::adapters::outbound::provider::GoListProvider;
use dep_culprit::application::dto::CulpritRequest;
use dep_culprit::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use dep_culprit::application::use_cases::FindCulpritsUseCase;
use dep_culprit::config::{self, ConfigFile};
use dep_culprit::culprit_analysis::domain::{PackageId, TargetMatcher};
use dep_culprit::culprit_analysis::services::BuildOptions;
use dep_culprit::shared::error::ExitCode;
use dep_culprit::shared::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_SNAPSHOT_PATH: &str = ".dep-culprit/graph.json";

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are reported through the same path
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args).await {
        eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::from_error(&e).as_i32());
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;

    let root = PackageId::new(args.root.as_str())?;
    let mode = args.match_mode.or(config.match_mode()).unwrap_or_default();
    let target = TargetMatcher::new(args.target.as_str(), mode)?;

    let snapshot_path = args
        .snapshot
        .clone()
        .or_else(|| config.snapshot.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));

    let defaults = BuildOptions::default();
    let build_options = BuildOptions {
        concurrency: args
            .concurrency
            .or(config.concurrency)
            .unwrap_or(defaults.concurrency),
        timeout: args
            .timeout
            .or(config.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout),
        max_retries: args
            .retries
            .or(config.max_retries)
            .unwrap_or(defaults.max_retries),
    };
    debug!(?build_options, snapshot = %snapshot_path.display(), "resolved options");

    // Create adapters (Dependency Injection)
    let mut provider = GoListProvider::new();
    if let Some(go) = args.go.clone().or_else(|| config.go_binary.clone()) {
        provider = provider.with_go_binary(go);
    }
    if let Some(ref dir) = args.dir {
        provider = provider.with_working_dir(dir);
    }

    let use_case = FindCulpritsUseCase::new(
        provider,
        JsonSnapshotRepository::new(),
        StderrProgressReporter::new(),
        build_options,
    );

    let request = CulpritRequest::new(root, target, snapshot_path)
        .with_source(args.graph_source())
        .with_save_snapshot(!args.no_save)
        .with_fallback_to_rebuild(args.fallback_rebuild);

    let response = use_case.execute(request).await?;
    info!(
        origin = ?response.origin,
        packages = response.package_count,
        chains = response.report.len(),
        "analysis finished"
    );

    let format = args.format.or(config.format()).unwrap_or_default();
    eprintln!("{}", FormatterFactory::progress_message(format));
    let output = FormatterFactory::create(format).format(&response.report)?;

    PresenterFactory::create(PresenterType::from(args.output)).present(&output)?;

    Ok(())
}

/// Explicit `--config` must exist; otherwise the working directory is searched
fn load_config(args: &Args) -> Result<ConfigFile> {
    match args.config {
        Some(ref path) => config::load_config_from_path(path),
        None => {
            let cwd = std::env::current_dir()?;
            Ok(config::discover_config(&cwd)?.unwrap_or_default())
        }
    }
}
