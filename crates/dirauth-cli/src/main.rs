//! Dirauth - LDAP credential checker
//!
//! Verifies that a directory server is reachable and that a DN and password
//! bind against it.

mod commands;

use clap::{Parser, Subcommand};
use dirauth_core::AuthConfig;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "dirauth")]
#[command(author = "Dirauth Team")]
#[command(version = dirauth_core::VERSION)]
#[command(about = "Check LDAP credentials with a simple bind", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory server host
    #[arg(long, global = true, env = "DIRAUTH_HOST")]
    host: Option<String>,

    /// Directory server port
    #[arg(short, long, global = true, env = "DIRAUTH_PORT")]
    port: Option<u16>,

    /// Reachability probe timeout in seconds
    #[arg(short, long, global = true, env = "DIRAUTH_TIMEOUT")]
    timeout: Option<f64>,

    /// LDAP protocol version (2 or 3)
    #[arg(long, global = true, env = "DIRAUTH_PROTOCOL_VERSION")]
    protocol_version: Option<u32>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "DIRAUTH_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Bind with a DN and password
    Check {
        /// Distinguished name to bind as
        #[arg(long)]
        dn: String,

        /// Bind password
        #[arg(long, env = "DIRAUTH_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Only check that the server accepts TCP connections
    Probe,

    /// Print the effective configuration
    Config,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = resolve_config(&cli)?;
    debug!("Effective configuration: {:?}", config);

    match cli.command {
        Commands::Check { dn, password } => {
            Ok(ExitCode::from(commands::check::execute(config, &dn, &password, cli.json)))
        }
        Commands::Probe => Ok(ExitCode::from(commands::probe::execute(config, cli.json))),
        Commands::Config => {
            commands::config::execute(&config, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Version => {
            println!("dirauth {}", dirauth_core::VERSION);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load config from file or environment, then apply command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<AuthConfig> {
    let mut config = if let Some(config_path) = &cli.config {
        AuthConfig::from_file(config_path)?
    } else {
        AuthConfig::from_env()
    };

    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_seconds = timeout;
    }
    if let Some(version) = cli.protocol_version {
        config.protocol_version = version;
    }

    Ok(config)
}
