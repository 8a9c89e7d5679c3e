pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{ConversionRequest, RateTable, RateTableProvider};
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Positional words in `[AMOUNT] [TO] [FROM]` order
    Convert(Vec<String>),
    Rates,
}

/// Loads configuration, builds the ECB provider and prints the command output.
pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    precision: Option<usize>,
) -> Result<()> {
    let mut config = AppConfig::load_or_default(config_path)?;
    if precision.is_some() {
        config.precision = precision;
    }
    debug!("Loaded config: {config:#?}");

    let provider = providers::ecb::EcbProvider::new(&config.source_url);
    let output = run_with_provider(command, &config, &provider).await?;
    println!("{output}");
    Ok(())
}

/// Runs a command against any rate source and returns the text to print.
pub async fn run_with_provider(
    command: AppCommand,
    config: &AppConfig,
    provider: &dyn RateTableProvider,
) -> Result<String> {
    match command {
        AppCommand::Convert(args) => {
            // Reject bad input before touching the network
            let request =
                ConversionRequest::from_args(&args, &config.default_from, config.target_currency())?;
            debug!(?request, "Parsed conversion request");

            let table = load_rates(provider).await?;
            let result = request.execute(&table)?;
            if let Some(date) = result.date {
                info!("Date: {date}");
            }
            info!(
                amount = result.amount,
                from = %result.from,
                to = %result.to,
                converted = result.converted,
                "Converted"
            );
            Ok(result.render(config.precision))
        }
        AppCommand::Rates => {
            let table = load_rates(provider).await?;
            Ok(table.display_as_table())
        }
    }
}

async fn load_rates(provider: &dyn RateTableProvider) -> Result<RateTable> {
    let spinner = cli::ui::new_spinner("Fetching reference rates...");
    let table = provider.load().await;
    spinner.finish_and_clear();
    Ok(table?)
}
