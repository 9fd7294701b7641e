//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Default configuration file, used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "pomsynth.toml";

/// pomsynth -- synthesize a Maven pom.xml from a tree of compiled archives.
///
/// Use `pomsynth <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "pomsynth", version, about, long_about = None)]
pub struct Cli {
    /// Path to the pomsynth.toml configuration file.
    ///
    /// When omitted, `pomsynth.toml` is used if present, otherwise defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a directory tree and write the generated pom.xml.
    Generate(GenerateArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- generate ----

/// Identification mode for discovered archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Run the external syft-compatible scanner and parse Maven purls.
    Syft,
    /// Derive coordinates from file names with placeholder group/version.
    Filename,
}

impl ModeArg {
    pub fn as_config_str(&self) -> &'static str {
        match self {
            Self::Syft => "syft",
            Self::Filename => "filename",
        }
    }
}

/// Run one generation. Arguments override `pomsynth.toml` values.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Directory to scan (default: `[scan] root`).
    pub root: Option<PathBuf>,

    /// Output file (default: `[output] path`).
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,

    /// Identification mode (default: `[scanner] mode`).
    #[arg(long)]
    pub mode: Option<ModeArg>,

    /// Scanner executable (default: `[scanner] command`).
    #[arg(long)]
    pub scanner_command: Option<String>,

    /// Per-archive scanner timeout in seconds (default: `[scanner] timeout_secs`).
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Fall back to the file name when the scanner fails for an archive.
    #[arg(long)]
    pub fallback_to_filename: bool,
}

// ---- config ----

/// Manage pomsynth configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, scan, scanner, heuristic, output).
        #[arg(long)]
        section: Option<String>,
    },
}
