//! ITN CLI - compute the French national thermal indicator from the command line.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "itn-cli",
    version,
    about = "National thermal indicator (ITN) toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: itn_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("itn-cli {}", env!("CARGO_PKG_VERSION"));
    itn_cmd::run(cli.command)
}
