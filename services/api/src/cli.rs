use crate::form::run_form;
use crate::quote::{run_batch, run_quote, run_rules, BatchArgs, QuoteArgs, RulesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use contract_payout::config::AppConfig;
use contract_payout::error::AppError;
use contract_payout::telemetry::{self, LogSink};

#[derive(Parser, Debug)]
#[command(
    name = "contract-payout",
    about = "Compute producer payouts for two- and three-party production contracts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Quote the payout for a single contract
    Quote(QuoteArgs),
    /// List the defined payout rules and the combinations still pending
    Rules(RulesArgs),
    /// Quote every contract listed in a CSV file
    Batch(BatchArgs),
    /// Interactive form: read selection/amount events from stdin and recompute on each
    Form,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let config = AppConfig::load()?;
    let sink = match command {
        Command::Serve(_) => LogSink::Stdout,
        _ => LogSink::Stderr,
    };
    telemetry::init(&config.telemetry, sink)?;

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Quote(args) => run_quote(&config, args),
        Command::Rules(args) => run_rules(&config, args),
        Command::Batch(args) => run_batch(&config, args),
        Command::Form => run_form(&config),
    }
}
