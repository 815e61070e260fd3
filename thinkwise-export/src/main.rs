//! thinkwise-export - Write ThinkWise downloads to a directory
//!
//! Boots the seeded stores with the demo profile and renders one of the
//! download center's files. The path written is printed on stdout.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use libthinkwise::config::Config;
use libthinkwise::export::{DirectorySink, DownloadCenter, ExportKind};
use libthinkwise::logging::LoggingConfig;
use libthinkwise::{seed, AdminStore, ReviewSettings, ReviewerBuilder, ThinkwiseError};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "thinkwise-export")]
#[command(about = "Export ThinkWise data to files", long_about = None)]
struct Cli {
    /// What to export
    #[arg(short, long, value_enum)]
    kind: KindArg,

    /// Output directory (default: export.output_dir from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Save a review session with every seeded question before exporting
    #[arg(long)]
    with_sample_session: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    /// Profile and progress summary (JSON)
    Profile,
    /// The user's review sessions (JSON)
    Reviewers,
    /// Plain-text progress report
    Report,
    /// Questions of the user's review sessions (CSV)
    Questions,
    /// Everything in one document (JSON)
    Backup,
}

impl From<KindArg> for ExportKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Profile => ExportKind::Profile,
            KindArg::Reviewers => ExportKind::Reviewers,
            KindArg::Report => ExportKind::Report,
            KindArg::Questions => ExportKind::Questions,
            KindArg::Backup => ExportKind::Backup,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env(cli.verbose).init();

    let config = Config::load().context("Failed to load configuration")?;
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.export.resolved_output_dir());

    match run(&cli, output_dir) {
        Ok(path) => {
            println!("{}", path.display());
            Ok(())
        }
        Err(e) => {
            error!("Export failed: {}", e);
            eprintln!("Error: {}", e.alert_message());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: &Cli, output_dir: PathBuf) -> Result<PathBuf, ThinkwiseError> {
    let profile = seed::demo_profile();
    let mut admin = AdminStore::new();

    if cli.with_sample_session {
        let mut builder = ReviewerBuilder::new().with_details(
            "Sample review",
            "Every question in the bank",
            ReviewSettings::default(),
        );
        let ids: Vec<String> = admin.questions().iter().map(|q| q.id.clone()).collect();
        for id in &ids {
            builder.toggle(id);
        }
        builder.save(&mut admin, &profile.user.id)?;
    }

    let kind = ExportKind::from(cli.kind);
    let mut sink = DirectorySink::new(output_dir);
    let filename = DownloadCenter::new(&profile, &admin).download(kind, &mut sink)?;

    info!("Export completed successfully");
    Ok(sink.path_for(&filename))
}
