//! procon-gardener CLI
//!
//! Archives accepted AtCoder submissions into a local (git) repository.

use std::path::{Path, PathBuf};
use std::process::Command as ProcessCommand;

use clap::{Parser, Subcommand};
use procon_gardener::{
    error::{AppError, Result},
    models::Config,
    pipeline,
    services::{DetailClient, FeedClient, GitRepository},
    storage::LocalArchive,
    utils::{default_config_path, http},
};

/// procon-gardener - archive your AC submissions
#[derive(Parser, Debug)]
#[command(
    name = "procon-gardener",
    version,
    about = "Archive your AC submissions"
)]
struct Cli {
    /// Path to the config file (default: ~/.procon-gardener/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Archive your AC submissions
    #[command(alias = "a")]
    Archive,

    /// Edit your config file
    #[command(alias = "e")]
    Edit,

    /// Create a default config file if none exists
    Init,

    /// Validate the config file
    Validate,

    /// Show archive status
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load and validate the config; a missing file is bootstrapped first.
fn load_config(path: &Path) -> Result<Config> {
    if Config::write_default(path)? {
        log::warn!(
            "Created a default config at {}. Fill in archive.user_id and archive.repository_path.",
            path.display()
        );
    }
    let config = Config::load(path)?;
    config.validate()?;
    Ok(config)
}

/// Command that hands a file to the desktop's default application.
fn system_opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

/// Open the config file in `$EDITOR`, `$VISUAL` or the system default handler.
fn edit_config(path: &Path) -> Result<()> {
    if Config::write_default(path)? {
        log::info!("Created default config at {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .ok()
        .filter(|e| !e.trim().is_empty());

    let (program, args) = match &editor {
        Some(editor) => (editor.as_str(), &[][..]),
        None => system_opener(),
    };

    let status = match ProcessCommand::new(program).args(args).arg(path).status() {
        Ok(status) => status,
        Err(e) if editor.is_none() => {
            log::warn!("Could not launch {}: {}", program, e);
            log::info!("Edit the config file manually: {}", path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    if !status.success() {
        return Err(AppError::config(format!("{program} exited with {status}")));
    }
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.unwrap_or_else(default_config_path);

    match cli.command {
        Command::Archive => {
            let config = load_config(&config_path)?;
            log::info!("Loaded configuration from {}", config_path.display());

            let client = http::create_async_client(&config.crawler)?;
            let feed = FeedClient::new(client.clone(), &config.platform);
            let source = DetailClient::new(client, &config.platform);
            let archive = LocalArchive::new(config.repository_path(), &config.platform.host);

            let summary = pipeline::run_archive(&config, &feed, &source, &archive).await?;
            if summary.failures() > 0 {
                log::warn!(
                    "{} submissions failed; they will be retried on the next run",
                    summary.failures()
                );
            }
        }

        Command::Edit => edit_config(&config_path)?,

        Command::Init => {
            if Config::write_default(&config_path)? {
                log::info!("Created default config at {}", config_path.display());
            } else {
                log::info!("Config already exists at {}", config_path.display());
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            let config = Config::load(&config_path)?;
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }

        Command::Info => {
            let config = Config::load_or_default(&config_path);
            let root = config.repository_path();
            let archive = LocalArchive::new(&root, &config.platform.host);

            log::info!("Config file: {}", config_path.display());
            log::info!("Archive root: {}", root.display());
            log::info!("User: {}", config.archive.user_id);
            log::info!(
                "Git working tree: {}",
                if GitRepository::detect(&root).is_some() {
                    "detected"
                } else {
                    "not found"
                }
            );
            log::info!("Archived problems: {}", archive.scan_archived_keys().len());
        }
    }

    Ok(())
}
