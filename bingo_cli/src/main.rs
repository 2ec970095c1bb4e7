use std::path::PathBuf;

use bingo_cli::{execute, Command, ConfigFile, Settings};
use bingo_store::{JsonDirGateway, Session};
use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Directory holding the boards as JSON documents
    #[arg(long)]
    store_dir: Option<PathBuf>,

    /// Whose boards to work with
    #[arg(short, long)]
    user: Option<String>,

    /// JSON file with defaults for the other options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let config = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let settings = Settings::resolve(args.store_dir, args.user, config)?;
    info!(user = %settings.user, store = %settings.store_dir.display());

    let gateway = JsonDirGateway::open(settings.store_dir)?;
    let mut session = Session::new(gateway, settings.user);
    execute(&mut session, args.command, &mut std::io::stdout().lock())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
