mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Command};

fn main() {
    env_logger::init();

    match Cli::parse().command {
        Command::Run { frames, json } => {
            commands::run::run(commands::run::RunArgs { frames, json });
        }
        Command::Dump { file, demo } => {
            commands::dump::run(commands::dump::DumpArgs { file, demo });
        }
    }
}
