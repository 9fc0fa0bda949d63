use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill blank target-language fields of the records in a JSON file
    Translate {
        /// JSON file with the records to translate
        #[arg(short, long)]
        input: PathBuf,

        /// Source locale code (defaults to the configured default locale)
        #[arg(short, long)]
        source: Option<String>,

        /// Target locale code
        #[arg(short, long)]
        target: String,

        /// Voice tone for the translation
        #[arg(long, default_value = "neutral")]
        tone: String,

        /// Write the translated records here instead of over the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show which fields would be translated, without calling the API
    Plan {
        /// JSON file with the records to inspect
        #[arg(short, long)]
        input: PathBuf,

        /// Source locale code (defaults to the configured default locale)
        #[arg(short, long)]
        source: Option<String>,

        /// Target locale code
        #[arg(short, long)]
        target: String,
    },

    /// List configured locales
    Locales {
        /// Leave this locale out (e.g. the chosen source)
        #[arg(long)]
        exclude: Option<String>,
    },

    /// List available voice tones
    Tones,
}
