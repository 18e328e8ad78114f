mod cli;
mod download;
mod paths;
mod platform;
mod release;
mod util;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() {
    if let Err(e) = run() {
        util::ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    cli::install::run(&cli)
}
