//! assetmon CLI - asset status tooling for a monitoring management group

use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::Cli;
use commands::common::ExitCode;
use commands::{dashboard, get_status, perf, set_status};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match &cli.command {
        cli::Commands::SetStatus(args) => set_status::execute(args, &cli.global).await,
        cli::Commands::GetStatus(args) => get_status::execute(args, &cli.global).await,
        cli::Commands::Dashboard(args) => dashboard::execute(args, &cli.global).await,
        cli::Commands::Perf(args) => perf::execute(args, &cli.global).await,
    };

    if let Err(err) = result {
        if let Some(ExitCode(code)) = err.downcast_ref::<ExitCode>() {
            std::process::exit(*code);
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

/// `warn` by default, `debug` with --verbose; RUST_LOG wins when set.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
