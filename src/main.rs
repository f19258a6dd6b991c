use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use profitmax::core::{Method, log::init_logging};

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
    /// Compute profit maximizing prices for the configured products
    Optimize {
        /// Print the pricing records as JSON
        #[arg(long)]
        json: bool,

        /// Override the optimization method from the config
        #[arg(short, long, value_enum)]
        method: Option<MethodArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    ClosedForm,
    GoldenSection,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Method {
        match arg {
            MethodArg::ClosedForm => Method::ClosedForm,
            MethodArg::GoldenSection => Method::GoldenSection,
        }
    }
}

impl From<Commands> for profitmax::AppCommand {
    fn from(cmd: Commands) -> profitmax::AppCommand {
        match cmd {
            Commands::Optimize { json, method } => profitmax::AppCommand::Optimize {
                json,
                method: method.map(Method::from),
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => profitmax::cli::setup::setup_at_path(path),
            None => profitmax::cli::setup::setup(),
        },
        Some(cmd) => profitmax::run_command(cmd.into(), cli.config_path.as_deref()),
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
