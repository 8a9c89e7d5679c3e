use anyhow::Result;
use clap::{Parser, Subcommand};
use exrate::core::log::init_logging;

/// Convert an amount between currencies using the ECB daily reference rates
#[derive(Parser, Debug)]
#[command(version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Decimal places of the converted amount
    #[arg(short, long)]
    precision: Option<usize>,

    /// [AMOUNT] [TO] [FROM], e.g. `10 JPY USD`
    #[arg(value_name = "ARGS", num_args = 0..=3, allow_negative_numbers = true)]
    args: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List the latest reference rates
    Rates,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => exrate::cli::setup::setup()
            .map(|path| println!("Created default configuration at {}", path.display())),
        Some(Commands::Rates) => {
            exrate::run_command(exrate::AppCommand::Rates, config_path, None).await
        }
        None => {
            exrate::run_command(
                exrate::AppCommand::Convert(cli.args),
                config_path,
                cli.precision,
            )
            .await
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use exrate::core::{ConversionRequest, ExchangeError};

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("exrate").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_words_and_precision() {
        let cli = parse(&["-p", "2", "10", "JPY", "USD"]).unwrap();
        assert_eq!(cli.precision, Some(2));
        assert_eq!(cli.args, vec!["10", "JPY", "USD"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_no_words_uses_defaults() {
        let cli = parse(&[]).unwrap();
        assert!(cli.args.is_empty());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_negative_amount_reaches_validation() {
        let cli = parse(&["-5", "JPY"]).unwrap();
        assert_eq!(cli.args, vec!["-5", "JPY"]);

        let err = ConversionRequest::from_args(&cli.args, "USD", "EUR").unwrap_err();
        assert_eq!(err, ExchangeError::InvalidAmount("'-5' is negative".to_string()));
    }

    #[test]
    fn test_at_most_three_words() {
        assert!(parse(&["1", "EUR", "USD", "GBP"]).is_err());
    }

    #[test]
    fn test_subcommands() {
        let cli = parse(&["rates"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Rates));
        assert!(cli.args.is_empty());

        let cli = parse(&["rates", "--verbose"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Rates));
        assert!(cli.verbose);

        let cli = parse(&["setup"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Setup));
    }

    #[test]
    fn test_global_config_path() {
        let cli = parse(&["rates", "-c", "/tmp/exrate.yaml"]).unwrap();
        assert_eq!(cli.config_path.as_deref(), Some("/tmp/exrate.yaml"));
    }
}
