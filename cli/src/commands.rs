pub mod decode;
pub mod encode;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nfa")]
#[command(about = "Inspect and build NetFlow Analyzer IP groups.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce output (-q drops headers, -qq prints summaries only)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a saved listIPGroup JSON response
    #[command(alias = "d")]
    Decode { file: PathBuf },
    /// Build an IP group and print the form payload it encodes to
    #[command(alias = "e")]
    Encode(encode::EncodeArgs),
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
