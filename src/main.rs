use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use invctl::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Print today's volatility and sentiment guidance
    Advise {
        /// CNN Fear & Greed put/call reading
        #[arg(long, default_value_t = 0.71)]
        cnn: f64,
        /// CBOE equity put/call ratio
        #[arg(long, default_value_t = 0.66)]
        cboe: f64,
    },
    /// Price the holdings and check the maintenance ratio
    Margin {
        /// Loan balance override (defaults to the configured amount)
        #[arg(long)]
        loan: Option<f64>,
    },
    /// Compute principal, profit and ROI from a live valuation
    Performance {
        /// Loan balance override (defaults to the configured amount)
        #[arg(long)]
        loan: Option<f64>,
    },
    /// Manage the holdings table
    Positions {
        #[command(subcommand)]
        command: Option<PositionsCommands>,
    },
    /// Manage the trade log
    Trades {
        #[command(subcommand)]
        command: Option<TradesCommands>,
    },
    /// Manage the capital log
    Capital {
        #[command(subcommand)]
        command: Option<CapitalCommands>,
    },
    /// Manage the volatility rule table
    Rules {
        #[command(subcommand)]
        command: Option<RulesCommands>,
    },
}

#[derive(Subcommand)]
enum PositionsCommands {
    /// List holdings
    List,
    /// Add a holding or update its unit count
    Set { symbol: String, quantity: f64 },
    /// Remove a holding
    Rm { symbol: String },
}

#[derive(Subcommand)]
enum TradesCommands {
    /// List recorded trades
    List,
    /// Append a trade to the log
    Add {
        #[arg(long)]
        symbol: String,
        /// Buy, Sell or Pledge
        #[arg(long)]
        action: String,
        /// Total amount of the trade
        #[arg(long)]
        amount: f64,
        /// Trade date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        quantity: Option<f64>,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
enum CapitalCommands {
    /// List capital movements and the principal total
    List,
    /// Append a capital movement
    Add {
        /// Movement type, e.g. Deposit or Withdrawal
        #[arg(long)]
        kind: String,
        /// Amount (negative for withdrawals)
        #[arg(long)]
        amount: f64,
        /// Movement date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
enum RulesCommands {
    /// List the volatility rules
    List,
    /// Append a rule
    Add {
        /// VIX level at which the rule fires
        #[arg(long)]
        threshold: f64,
        /// What to do when it fires
        #[arg(long)]
        action: String,
    },
    /// Remove a rule by its listing index
    Rm { index: usize },
}

impl From<Commands> for invctl::AppCommand {
    fn from(cmd: Commands) -> invctl::AppCommand {
        match cmd {
            Commands::Advise { cnn, cboe } => invctl::AppCommand::Advise { cnn, cboe },
            Commands::Margin { loan } => invctl::AppCommand::Margin { loan },
            Commands::Performance { loan } => invctl::AppCommand::Performance { loan },
            Commands::Positions { command } => {
                invctl::AppCommand::Positions(match command.unwrap_or(PositionsCommands::List) {
                    PositionsCommands::List => invctl::PositionsCommand::List,
                    PositionsCommands::Set { symbol, quantity } => {
                        invctl::PositionsCommand::Set { symbol, quantity }
                    }
                    PositionsCommands::Rm { symbol } => invctl::PositionsCommand::Remove { symbol },
                })
            }
            Commands::Trades { command } => {
                invctl::AppCommand::Trades(match command.unwrap_or(TradesCommands::List) {
                    TradesCommands::List => invctl::TradesCommand::List,
                    TradesCommands::Add {
                        symbol,
                        action,
                        amount,
                        date,
                        price,
                        quantity,
                        note,
                    } => invctl::TradesCommand::Add {
                        date,
                        symbol,
                        action,
                        price,
                        quantity,
                        amount,
                        note,
                    },
                })
            }
            Commands::Capital { command } => {
                invctl::AppCommand::Capital(match command.unwrap_or(CapitalCommands::List) {
                    CapitalCommands::List => invctl::CapitalCommand::List,
                    CapitalCommands::Add {
                        kind,
                        amount,
                        date,
                        note,
                    } => invctl::CapitalCommand::Add {
                        date,
                        kind,
                        amount,
                        note,
                    },
                })
            }
            Commands::Rules { command } => {
                invctl::AppCommand::Rules(match command.unwrap_or(RulesCommands::List) {
                    RulesCommands::List => invctl::RulesCommand::List,
                    RulesCommands::Add { threshold, action } => {
                        invctl::RulesCommand::Add { threshold, action }
                    }
                    RulesCommands::Rm { index } => invctl::RulesCommand::Remove { index },
                })
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => invctl::cli::setup::setup(),
        Some(cmd) => invctl::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
