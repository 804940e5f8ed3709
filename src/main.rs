use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use skyrate::core::log::init_logging;
use skyrate::core::settings::{Language, Theme};

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
    /// Convert an amount between two currencies
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        from: String,
        to: String,
    },
    /// Show amounts for 1, 10, 100 and 1000 units of a currency
    Table {
        from: String,
        #[arg(required = true)]
        to: Vec<String>,
    },
    /// List supported currencies
    Currencies,
    /// Show or change interface settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Print current settings
    Show,
    /// Update theme and/or language
    Set {
        #[arg(long)]
        theme: Option<Theme>,
        #[arg(long)]
        language: Option<Language>,
    },
}

impl From<Commands> for skyrate::AppCommand {
    fn from(cmd: Commands) -> skyrate::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => skyrate::AppCommand::Convert {
                amount,
                from: from.to_uppercase(),
                to: to.to_uppercase(),
            },
            Commands::Table { from, to } => skyrate::AppCommand::Table {
                from: from.to_uppercase(),
                to: to.iter().map(|code| code.to_uppercase()).collect(),
            },
            Commands::Currencies => skyrate::AppCommand::Currencies,
            Commands::Settings { command } => match command {
                SettingsCommands::Show => skyrate::AppCommand::ShowSettings,
                SettingsCommands::Set { theme, language } => {
                    skyrate::AppCommand::SetSettings { theme, language }
                }
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => skyrate::cli::setup::setup(),
        Some(cmd) => skyrate::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
