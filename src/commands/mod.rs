//! CLI command definitions and dispatch.

pub mod build;
pub mod validate;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use analytics_core::config::AnalyticsConfig;
use analytics_core::error::AppError;

/// Build and validate analytics messages
#[derive(Debug, Parser)]
#[command(name = "analytics", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (extension optional)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay, loaded from `config/<env>`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Write key, overriding the configured one
    #[arg(long)]
    pub write_key: Option<String>,

    /// Output format for reports
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build one message and print it as a JSON line
    Build(build::BuildArgs),
    /// Validate a file of JSON-line messages
    Validate(validate::ValidateArgs),
}

impl Cli {
    /// Load configuration and apply command-line overrides
    pub fn load_config(&self) -> Result<AnalyticsConfig, AppError> {
        let mut config = AnalyticsConfig::load(&self.config, &self.env)?;
        if let Some(write_key) = &self.write_key {
            config.client.write_key = write_key.clone();
        }
        Ok(config)
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: AnalyticsConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Build(args) => build::execute(args, &config).await,
            Commands::Validate(args) => validate::execute(args, self.format).await,
        }
    }
}
