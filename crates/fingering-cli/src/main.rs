mod cli;
mod format;
mod handlers;
mod input;
mod reports;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::handlers::{handle_plan, handle_segments};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Plan(args) => handle_plan(cli.format, args),
        Command::Segments(args) => handle_segments(cli.format, args),
    }
}
