use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fleet_cli::cli::{handle_fleet_command, run_session, FleetCommands};
use fleet_cli::config::{FleetPaths, Settings};
use fleet_cli::services::FleetRegistry;
use fleet_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fleet",
    version,
    about = "Terminal-based fleet registry",
    long_about = "Fleet CLI tracks a fleet of boats and the expenses spent on them. \
                  Expenses are only authorized while a boat's lifetime spending \
                  stays within its purchase price."
)]
struct Cli {
    /// CSV file to load the fleet from (defaults to the saved snapshot)
    source: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, env = "FLEET_CLI_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Fleet(FleetCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => FleetPaths::with_base_dir(dir),
        None => FleetPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths, settings)?;

    match cli.command {
        Some(Commands::Fleet(cmd)) => handle_fleet_command(&storage, cmd)?,
        Some(Commands::Config) => {
            let paths = storage.paths();
            let settings = storage.settings();
            println!("Fleet CLI Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Snapshot file:    {}", paths.snapshot_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Backups kept:  {}", settings.backup_retention);
            println!("  Audit enabled: {}", settings.audit_enabled);
        }
        None => run_interactive(&storage, cli.source)?,
    }

    Ok(())
}

fn run_interactive(storage: &Storage, source: Option<PathBuf>) -> Result<()> {
    let mut registry = FleetRegistry::new();

    let loaded = match source {
        Some(path) => registry.load_from_delimited_text(&path).map(|_| ()),
        None => storage.load_fleet(&mut registry),
    };
    if let Err(e) = loaded {
        println!("Error loading data: {}", e);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_session(&mut registry, storage, stdin.lock(), &mut stdout)?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FLEET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}
