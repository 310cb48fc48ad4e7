use anyhow::Context;
use clap::Parser;
use closetr::domain::account::SessionToken;
use closetr::domain::config::{AppConfig, LoggingConfig};
use closetr::features::register::RegisterForm;
use closetr::features::register::memory::{MemoryDirectory, MemorySessions, RecordingNavigator};
use closetr::kernel::config::load_config;
use closetr_logger::{LevelFilter, Logger};
use closetr_shell::{Exit, Shell};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;

/// Interactive registration form backed by an in-memory account directory.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Config file (TOML, JSON or YAML). Defaults to `closetr.*` in the working directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides `logging.level`.
    #[arg(long)]
    log_level: Option<LevelFilter>,

    /// Usernames that already exist.
    #[arg(long = "taken", value_name = "USERNAME")]
    taken: Vec<String>,

    /// Starts with an active session, as if a user were already signed in.
    #[arg(long, value_name = "TOKEN")]
    session: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let cfg: AppConfig =
        load_config(args.config.as_deref()).context("Critical: Configuration is malformed")?;
    let _log = init_logger(&cfg.logging, args.log_level)?;
    info!(slices = ?closetr::features::ENABLED, "Closetr shell starting");

    let sessions = args.session.map_or_else(MemorySessions::new, |token| {
        MemorySessions::signed_in(SessionToken::new(token))
    });
    let directory = MemoryDirectory::new().with_taken(args.taken).with_sessions(sessions.clone());
    let navigator = RecordingNavigator::new();

    let form = RegisterForm::new(sessions, directory, navigator.clone(), &cfg.register);
    let exit = Shell::new(form).run(BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    match exit {
        Exit::Navigated => info!(route = ?navigator.last(), "Left registration"),
        Exit::Quit => info!("Shell closed"),
    }

    Ok(())
}

fn init_logger(cfg: &LoggingConfig, level: Option<LevelFilter>) -> anyhow::Result<Logger> {
    let level = match level {
        Some(level) => level,
        None => cfg.level.parse().with_context(|| format!("Invalid logging.level '{}'", cfg.level))?,
    };
    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level);

    let logger = match &cfg.directory {
        Some(directory) if cfg.json => builder.console(false).directory(directory).json().init()?,
        Some(directory) => builder.console(false).directory(directory).init()?,
        None => builder.init()?,
    };

    Ok(logger)
}
