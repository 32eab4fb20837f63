use crate::commands::{run_list_requests, run_route_lookup, ListRequestsArgs, RouteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use crisis_rescue::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Live Crisis Rescue System",
    about = "Run the crisis rescue backend or query its routing and request log from the command line",
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
    /// Look up one driving route and print its distance and ETA
    Route(RouteArgs),
    /// Inspect the rescue request log
    Requests {
        #[command(subcommand)]
        command: RequestsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RequestsCommand {
    /// Print every stored rescue request in log order
    List(ListRequestsArgs),
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
        Command::Route(args) => run_route_lookup(args).await,
        Command::Requests {
            command: RequestsCommand::List(args),
        } => run_list_requests(args),
    }
}
