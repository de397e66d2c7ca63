//! CLI entry point for frontdesk.

mod app;
mod cli;

use clap::Parser;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    frontdesk::logging::init_logging(args.verbose);
    let code = app::entry::run(args).await;
    std::process::exit(code);
}
