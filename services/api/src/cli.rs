use crate::demo::{run_demo, run_list, DemoArgs, ListArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use tenant_screening::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Tenant Screening",
    about = "Run the tenant screening service or inspect screening applications from the command line",
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
    /// Inspect applications persisted by the service
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
    /// Walk two candidates through screening and review
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ApplicationsCommand {
    /// List stored applications with their overall scores
    List(ListArgs),
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
        Command::Applications {
            command: ApplicationsCommand::List(args),
        } => run_list(args),
        Command::Demo(args) => run_demo(args),
    }
}
