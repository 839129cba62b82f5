use dotenvy::dotenv;
use serde_json::{Value, json};
use tokes_payments::{PaymentsClient, PaymentsError, StatisticsQuery};

use crate::config::{CliConfigError, Command, Config};
use crate::telemetry;

/// Failures surfaced to `main`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid configuration")]
    Config(#[from] CliConfigError),
    #[error("Invalid client configuration")]
    Client(#[from] tokes_payments::ConfigError),
    #[error("Request failed")]
    Payments(#[from] PaymentsError),
    #[error("Failed to render output")]
    Output(#[from] serde_json::Error),
}

/// Runs one command against the payments API.
///
/// - Loads `.env` variables.
/// - Installs the log subscriber.
/// - Builds a [`PaymentsClient`] from flags, environment and config file.
/// - Prints the response as pretty JSON.
pub async fn run() -> Result<(), CliError> {
    dotenv().ok();
    telemetry::init();

    let config = Config::load()?;
    let client = PaymentsClient::try_new(config.client().clone())?;
    tracing::debug!(host = %config.client().host, "Client ready");

    let output = execute(&client, config.command(), config.access_key()).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn execute(
    client: &PaymentsClient,
    command: &Command,
    access_key: Option<&str>,
) -> Result<Value, CliError> {
    let output = match command {
        Command::Ping => client.ping().await?,
        Command::TestKey => client.test_key(access_key).await?,
        Command::OrderStatus { id } => client.order_status(id, access_key).await?,
        Command::PaymentStatus { id } => client.payment_status(id, access_key).await?,
        Command::Rate { currency } => client.market_usd_rate(currency, access_key).await?,
        Command::Stats { kind, currency } => {
            let query = StatisticsQuery::new()
                .with("type", kind.as_str())
                .with("currency", currency.as_str());
            client.get_statistics(Some(&query), access_key).await?
        }
        Command::Addresses => {
            let addresses = client.get_filtered_addresses(access_key).await?;
            serde_json::to_value(addresses)?
        }
        Command::HasAddress => json!(client.has_valid_address(access_key).await?),
    };
    Ok(output)
}
