use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scenewire", bin_name = "scenewire")]
#[command(about = "Remote incremental scene-description protocol tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Play the demo director headlessly and print the drawing calls
    #[command(after_help = r#"EXAMPLES:
  scenewire run
  scenewire run --frames 10
  scenewire run --frames 10 --json"#)]
    Run {
        /// Number of frames to play
        #[arg(long, default_value_t = 1, value_name = "N")]
        frames: u64,

        /// Emit drawing calls as JSON, one frame per line
        #[arg(long)]
        json: bool,
    },

    /// Disassemble an Update stream
    #[command(after_help = r#"EXAMPLES:
  scenewire dump stream.bin
  cat stream.bin | scenewire dump -
  scenewire dump --demo"#)]
    Dump {
        /// Stream file (use "-" for stdin)
        #[arg(value_name = "FILE", required_unless_present = "demo")]
        file: Option<PathBuf>,

        /// Disassemble the demo director's setup stream instead
        #[arg(long, conflicts_with = "file")]
        demo: bool,
    },
}
