use anyhow::Result;
use clap::Parser;

use respack::{
    cli::{self, Cli},
    settings::Settings,
};

fn main() -> Result<()> {
    env_logger::init();

    let args = Cli::parse();

    let mut stdout = std::io::stdout().lock();
    cli::run(args.command, Settings::load, &mut stdout)
}
