// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use repo_audit::{
    AuditOrchestrator, Config, ConsoleReporter, GithubGateway, JsonExporter, Overrides,
    RunOptions,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "repo_audit")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Audit GitHub organization access and archive stale repositories", long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Organization to audit
    #[arg(short, long, global = true)]
    org: Option<String>,

    /// API token; prefer the environment over the command line
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Days without an update before a repository counts as stale
    #[arg(long, value_name = "DAYS", global = true)]
    retention_days: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report repositories, collaborators, teams and members, then archive stale repositories
    Audit {
        /// Report stale repositories without archiving them
        #[arg(long)]
        dry_run: bool,

        /// Also write the report as JSON
        #[arg(short, long, value_name = "FILE")]
        export: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,
    },

    /// List stale repositories only; archive them with --archive
    Stale {
        #[arg(long)]
        archive: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // clap reads GITHUB_TOKEN from the environment, so .env must be loaded first
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    repo_audit::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Repository access audit");

    let overrides = Overrides {
        organization: cli.org.clone(),
        token: cli.token.clone(),
        retention_days: cli.retention_days,
    };

    if let Some(path) = &cli.config {
        info!("Loading configuration from: {}", path.display());
    }
    let config = Config::load(cli.config.as_deref(), &overrides)
        .context("Failed to load configuration")?;

    let gateway = GithubGateway::new(&config.github).context("Failed to create API client")?;

    match cli.command {
        Commands::Audit {
            dry_run,
            export,
            pretty,
        } => {
            cmd_audit(&config, &gateway, cli.color, dry_run, export, pretty).await?;
        }
        Commands::Stale { archive } => {
            cmd_stale(&config, &gateway, cli.color, archive).await?;
        }
    }

    Ok(())
}

async fn cmd_audit(
    config: &Config,
    gateway: &GithubGateway,
    colored: bool,
    dry_run: bool,
    export: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let start_time = Instant::now();

    // Fail on an unwritable export path before any remote call.
    let exporter = export
        .map(JsonExporter::new)
        .transpose()
        .context("Failed to prepare export")?;

    if dry_run {
        warn!("Dry run: stale repositories will not be archived");
    }

    let options = RunOptions {
        dry_run,
        show_progress: true,
        colored,
    };
    let orchestrator = AuditOrchestrator::new(gateway, config.audit.clone(), options);
    let (report, stats) = orchestrator.run().await;

    let reporter = ConsoleReporter::new(colored);
    reporter.print(&report);
    print!("{}", reporter.render_stats(&stats));

    if let Some(exporter) = exporter {
        exporter
            .export(&report, pretty)
            .context("Failed to write JSON export")?;
    }

    info!(
        "Audit complete in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

async fn cmd_stale(
    config: &Config,
    gateway: &GithubGateway,
    colored: bool,
    archive: bool,
) -> Result<()> {
    let options = RunOptions {
        dry_run: !archive,
        show_progress: false,
        colored,
    };
    let orchestrator = AuditOrchestrator::new(gateway, config.audit.clone(), options);
    let report = orchestrator.run_stale_at(chrono::Utc::now()).await;

    ConsoleReporter::new(colored).print_stale(&report);

    if !archive && !report.stale.is_empty() {
        info!("Use --archive to archive these repositories");
    }

    Ok(())
}
