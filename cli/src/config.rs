//! Configuration for the command line tool.
//!
//! Values come from, in order of precedence: command line flags, environment
//! variables (a `.env` file is loaded first), and an optional JSON config file.
//! Keys in the file may reference environment variables (`"$TOKES_API_KEY"`).

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tokes_payments_types::{ClientConfig, LiteralOrEnv, StatisticsQuery};

#[derive(Parser, Debug)]
#[command(name = "tokes-payments")]
#[command(about = "Query the Tokes merchant payments API")]
struct CliArgs {
    /// Path to a JSON configuration file
    #[arg(long, short, env = "TOKES_PAYMENTS_CONFIG")]
    config: Option<PathBuf>,
    /// Base URL of the payments service
    #[arg(long, env = "TOKES_PAYMENTS_HOST")]
    host: Option<String>,
    /// Default access key
    #[arg(long, env = "TOKES_PAYMENTS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Service key sent as `appkey`
    #[arg(long, env = "TOKES_PAYMENTS_SERVICE_KEY", hide_env_values = true)]
    service_key: Option<String>,
    /// Access key for this invocation only, overriding the default
    #[arg(long, global = true)]
    access_key: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check that the service is up
    Ping,
    /// Verify the access key
    TestKey,
    /// Show an order
    OrderStatus { id: String },
    /// Show a payment
    PaymentStatus { id: String },
    /// USD market rate for a currency
    Rate { currency: String },
    /// Merchant statistics
    Stats {
        #[arg(long = "type", default_value = StatisticsQuery::DEFAULT_TYPE)]
        kind: String,
        #[arg(long, default_value = StatisticsQuery::DEFAULT_CURRENCY)]
        currency: String,
    },
    /// List configured withdrawal addresses
    Addresses,
    /// Print `true` if any withdrawal address is configured, `false` otherwise
    HasAddress,
}

/// Contents of the optional JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileConfig {
    #[serde(default)]
    host: Option<String>,
    #[serde(default, alias = "api_key")]
    api_key: Option<LiteralOrEnv<String>>,
    #[serde(default, alias = "service_key")]
    service_key: Option<LiteralOrEnv<String>>,
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    client: ClientConfig,
    access_key: Option<String>,
    command: Command,
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum CliConfigError {
    #[error("Failed to read config file at {0}: {1}")]
    FileRead(PathBuf, std::io::Error),
    #[error("Failed to parse config file: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Config {
    /// Parses the command line and merges it over the config file, if any.
    pub fn load() -> Result<Self, CliConfigError> {
        let cli_args = CliArgs::parse();
        let file = match &cli_args.config {
            Some(path) => Self::read_file(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(cli_args, file))
    }

    fn read_file(path: &PathBuf) -> Result<FileConfig, CliConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| CliConfigError::FileRead(path.clone(), e))?;
        Ok(serde_json::from_str(&content)?)
    }

    fn merge(cli_args: CliArgs, file: FileConfig) -> Self {
        let host = cli_args.host.or(file.host).unwrap_or_default();
        let client = ClientConfig {
            host,
            api_key: cli_args
                .api_key
                .or(file.api_key.map(LiteralOrEnv::into_inner)),
            service_key: cli_args
                .service_key
                .or(file.service_key.map(LiteralOrEnv::into_inner)),
        };
        Self {
            client,
            access_key: cli_args.access_key,
            command: cli_args.command,
        }
    }

    pub fn client(&self) -> &ClientConfig {
        &self.client
    }

    pub fn access_key(&self) -> Option<&str> {
        self.access_key.as_deref()
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}
