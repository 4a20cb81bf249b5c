mod commands;
mod terminal;

use commands::{CommandLine, Commands, decode, encode};
use nfa_common::config::Config;
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg = Config {
        quiet: commands.quiet,
        no_color: commands.no_color,
    };
    if cfg.no_color {
        colored::control::set_override(false);
    }

    match commands.command {
        Commands::Decode { file } => {
            print::header("decoding ip groups", cfg.quiet);
            decode::decode(&file, &cfg)
        }
        Commands::Encode(args) => {
            print::header("encoding ip group", cfg.quiet);
            encode::encode(args, &cfg)
        }
    }
}
