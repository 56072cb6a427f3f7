use clap::{Parser, Subcommand};

use tap_cli::commands::engine_ops;

#[derive(Parser)]
#[command(name = "taptool", about = "Tapnine prediction diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Press a digit string once and print the suggestions
    Suggest {
        /// Dictionary TSV file
        dict_file: String,
        /// Digit string, e.g. 2775 (0 is the space key)
        digits: String,
        /// Engine configuration TOML file (optional)
        #[arg(long)]
        config: Option<String>,
    },
    /// Interactive typing loop on stdin
    Type {
        /// Dictionary TSV file
        dict_file: String,
        /// Engine configuration TOML file (optional)
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Suggest {
            dict_file,
            digits,
            config,
        } => engine_ops::suggest(&dict_file, &digits, config.as_deref()),
        Command::Type { dict_file, config } => {
            engine_ops::repl(&dict_file, config.as_deref())
        }
    }
}
