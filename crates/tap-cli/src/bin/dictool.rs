use clap::{Parser, Subcommand};

use tap_cli::commands::{config_ops, dict_ops};
use tap_core::dict::{Weight, WEIGHT_DEFAULT};

#[derive(Parser)]
#[command(name = "dictool", about = "Tapnine dictionary maintenance tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that a dictionary file parses and every word is typeable
    Validate {
        /// Dictionary TSV file
        dict_file: String,
    },
    /// Show dictionary statistics
    Stats {
        /// Dictionary TSV file
        dict_file: String,
    },
    /// Print the heaviest entries
    Top {
        /// Dictionary TSV file
        dict_file: String,
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        n: usize,
    },
    /// Add a word to a dictionary
    Add {
        /// Dictionary TSV file
        dict_file: String,
        /// Word to add (letters only)
        word: String,
        /// Initial weight
        #[arg(long, default_value_t = WEIGHT_DEFAULT)]
        weight: Weight,
    },
    /// Build a dictionary from a plain wordlist (one word per line)
    FromWordlist {
        /// Input wordlist
        input_file: String,
        /// Output dictionary TSV file
        output_file: String,
    },
    /// Print the keypad digit sequence for a word
    Encode {
        /// Word to encode
        word: String,
    },
    /// Print the default engine configuration as TOML
    ConfigExport,
    /// Validate an engine configuration TOML file
    ConfigValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Validate { dict_file } => dict_ops::validate(&dict_file),
        Command::Stats { dict_file } => dict_ops::stats(&dict_file),
        Command::Top { dict_file, n } => dict_ops::top(&dict_file, n),
        Command::Add {
            dict_file,
            word,
            weight,
        } => dict_ops::add(&dict_file, &word, weight),
        Command::FromWordlist {
            input_file,
            output_file,
        } => dict_ops::from_wordlist(&input_file, &output_file),
        Command::Encode { word } => dict_ops::encode(&word),
        Command::ConfigExport => config_ops::config_export(),
        Command::ConfigValidate { file } => config_ops::config_validate(&file),
    }
}
