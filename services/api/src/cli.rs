use crate::hunt::{run_hunt, HuntArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use side_quest::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Side Quest Hunt",
    about = "Find free rooms with quick maintenance fixes in a housekeeping report",
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
    /// Build the side quest PDF from a housekeeping CSV and print a preview
    Hunt(HuntArgs),
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

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Hunt(args) => run_hunt(args),
    }
}
