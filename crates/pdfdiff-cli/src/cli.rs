use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Compare two versions of a document from their extracted text fragments.
#[derive(Debug, Parser)]
#[command(name = "pdfdiff", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decide, page by page, what changed between two versions
    Compare {
        /// Fragment dump of the old version (JSON)
        #[arg(value_name = "OLD")]
        old: PathBuf,

        /// Fragment dump of the new version (JSON)
        #[arg(value_name = "NEW")]
        new: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[command(flatten)]
        diff: DiffArgs,
    },

    /// Print the highlight plan for the diff document as JSON
    Plan {
        /// Fragment dump of the old version (JSON)
        #[arg(value_name = "OLD")]
        old: PathBuf,

        /// Fragment dump of the new version (JSON)
        #[arg(value_name = "NEW")]
        new: PathBuf,

        #[command(flatten)]
        diff: DiffArgs,
    },
}

/// Options shared by every comparing subcommand.
#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Matching tolerance; candidates are accepted below twice this distance (default: 15.0)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// JSON file with diff options; command-line flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Apply Unicode normalization to fragment text before comparing
    #[arg(long, value_enum)]
    pub unicode_norm: Option<UnicodeNormArg>,
}

/// Output format for the compare subcommand.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (tab-separated)
    Text,
    /// JSON output
    Json,
}

/// Unicode normalization form for CLI arguments.
#[derive(Debug, Clone, ValueEnum)]
pub enum UnicodeNormArg {
    /// Canonical Decomposition, followed by Canonical Composition
    Nfc,
    /// Canonical Decomposition
    Nfd,
    /// Compatibility Decomposition, followed by Canonical Composition
    Nfkc,
    /// Compatibility Decomposition
    Nfkd,
}

impl UnicodeNormArg {
    /// Convert to the core library's `UnicodeNorm` enum.
    pub fn to_unicode_norm(&self) -> pdfdiff_core::UnicodeNorm {
        match self {
            UnicodeNormArg::Nfc => pdfdiff_core::UnicodeNorm::Nfc,
            UnicodeNormArg::Nfd => pdfdiff_core::UnicodeNorm::Nfd,
            UnicodeNormArg::Nfkc => pdfdiff_core::UnicodeNorm::Nfkc,
            UnicodeNormArg::Nfkd => pdfdiff_core::UnicodeNorm::Nfkd,
        }
    }
}
