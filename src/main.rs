use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use credvault::cli::{handle_creds_command, CredsCommands};
use credvault::config::{paths::VaultPaths, settings::Settings};
use credvault::crypto::PASSPHRASE_ENV;
use credvault::VaultError;

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "CREDVAULT_LOG";

#[derive(Parser)]
#[command(
    name = "credvault",
    version,
    about = "Encrypted local credential vault",
    long_about = "credvault keeps provider credentials (usernames, passwords, API keys) \
                  for each persona in a single passphrase-encrypted file. \
                  The passphrase is read from the CREDVAULT_PASSPHRASE environment variable."
)]
struct Cli {
    /// Store root (defaults to $CREDVAULT_HOME or ~/.credvault)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Credential management commands
    #[command(subcommand)]
    Creds(CredsCommands),

    /// Show resolved paths and settings
    Config,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            if let Some(VaultError::Authentication) = err.downcast_ref::<VaultError>() {
                eprintln!("Check that {} holds the passphrase this store was written with.", PASSPHRASE_ENV);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let paths = VaultPaths::resolve(cli.root.as_deref())?;
    let settings = Settings::load_or_default(&paths)?;

    match cli.command {
        Some(Commands::Creds(cmd)) => {
            handle_creds_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("credvault Configuration");
            println!("=======================");
            println!("Store root:      {}", paths.root().display());
            println!("Credential file: {}", paths.creds_file().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Audit enabled:    {}", settings.audit_enabled);
            println!("  Sensitive fields: {}", settings.sensitive_fields.join(", "));
            println!(
                "  Passphrase:       {}",
                if std::env::var_os(PASSPHRASE_ENV).is_some() {
                    "set"
                } else {
                    "not set"
                }
            );
        }
        None => {
            println!("credvault - encrypted local credential vault");
            println!();
            println!("Run 'credvault --help' for usage information.");
        }
    }

    Ok(())
}
