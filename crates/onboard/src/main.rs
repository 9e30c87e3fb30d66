mod cli;
mod commands;
mod errors;
mod logging;

use crate::cli::Cli;

use clap::Parser;
use color_eyre::Result;

fn main() -> Result<()> {
    let args = Cli::parse();
    crate::errors::init()?;
    crate::logging::init(args.verbose)?;

    let settings = commands::load_settings(&args)?;
    commands::run(args.cmd, settings)
}
