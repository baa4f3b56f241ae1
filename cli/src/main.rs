//! Agency CLI
//!
//! Terminal host for the inquiry wizard.
//!
//! # Usage
//!
//! ```bash
//! agency services list
//! agency schema show web-development --format yaml
//! agency inquire --service cybersecurity-solutions --locale ar
//! agency submit -f inquiry.json
//! agency config set api_url http://localhost:3000
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agency_forms::Locale;

mod commands;
mod config;
mod output;

/// Used when neither the flag, the environment nor the profile names an API
const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Parser)]
#[command(name = "agency")]
#[command(author = "Agency")]
#[command(version)]
#[command(about = "Agency inquiry command line", long_about = None)]
struct Cli {
    /// Inquiry API base URL
    #[arg(long, env = "AGENCY_API_URL")]
    api_url: Option<String>,

    /// Interface language (en, ar)
    #[arg(long, env = "AGENCY_LOCALE")]
    locale: Option<String>,

    /// Output format
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse service categories
    Services {
        #[command(subcommand)]
        action: ServiceCommands,
    },
    /// Inspect form schemas
    Schema {
        #[command(subcommand)]
        action: SchemaCommands,
    },
    /// Fill in an inquiry interactively
    Inquire {
        /// Service category id, e.g. web-development
        #[arg(long, short)]
        service: String,
    },
    /// Submit a prepared inquiry payload
    Submit {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ServiceCommands {
    /// List all service categories
    List,
}

#[derive(Subcommand)]
enum SchemaCommands {
    /// Show the form schema of a service
    Show { service: String },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let profile = cli.profile.as_deref();
    let config = config::Config::load(profile).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config file");
        config::Config::default()
    });

    let api_url = cli
        .api_url
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let locale = match cli.locale.or_else(|| config.locale.clone()) {
        Some(raw) => raw.parse::<Locale>()?,
        None => Locale::default(),
    };
    let format = match cli.format {
        Some(format) => format,
        None => config.default_format()?,
    };

    let client = commands::ApiClient::new(&api_url)?;

    match cli.command {
        Commands::Services { action } => commands::services::handle(action, format, locale),
        Commands::Schema { action } => commands::schema::handle(action, format, locale),
        Commands::Inquire { service } => commands::inquire::handle(&service, locale, &client).await,
        Commands::Submit { file } => commands::submit::handle(&file, &client, format).await,
        Commands::Config { action } => commands::config::handle(action, profile),
    }
}
