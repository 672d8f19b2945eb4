use clap::Parser;
use fan_in::cli::{describe_error, execute, init_tracing, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    if let Err(error) = execute(cli).await {
        eprintln!("{}", describe_error(&error));
        std::process::exit(1);
    }
}
