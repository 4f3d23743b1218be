use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{
    run_shell, AddCommand, ClearCommand, ConfigCommand, DeleteCommand, ListCommand, UpdateCommand,
};
use tracalorie::{App, AppError, Config, FileStore, ItemStorage, Page};

#[derive(Parser)]
#[command(name = "tracalorie")]
#[command(version)]
#[command(about = "Track food items and their calories", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a food item
    Add(AddCommand),

    /// List items and the calorie total
    List(ListCommand),

    /// Change an item's name or calories
    Update(UpdateCommand),

    /// Delete an item
    Delete(DeleteCommand),

    /// Remove all items
    Clear(ClearCommand),

    /// Show total calories
    Total,

    /// Start an interactive session
    Shell,

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracalorie=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("Use --help to see available commands");
            return Ok(());
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    execute_command(command, &config, &mut input, &mut out)
}

/// Loads persisted items from the configured data directory.
fn open_app(config: &Config) -> Result<App<FileStore, Page>, AppError> {
    let storage = ItemStorage::new(FileStore::new(config.data_dir.value.clone()));
    App::init(storage, Page::new())
}

fn execute_command(
    command: Commands,
    config: &Config,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Add(cmd) => cmd.run(&mut open_app(config)?, out)?,
        Commands::List(cmd) => cmd.run(&open_app(config)?, out)?,
        Commands::Update(cmd) => cmd.run(&mut open_app(config)?, out)?,
        Commands::Delete(cmd) => cmd.run(&mut open_app(config)?, input, out)?,
        Commands::Clear(cmd) => cmd.run(&mut open_app(config)?, input, out)?,
        Commands::Total => {
            let app = open_app(config)?;
            writeln!(out, "{}", app.store().total_calories())?;
        }
        Commands::Shell => run_shell(&mut open_app(config)?, input, out)?,
        Commands::Config(cmd) => cmd.run(config, out)?,
    }

    Ok(())
}
