use clap::Parser;
use std::path::PathBuf;

// Build version with format info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Format: composite JSON v1\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Composite data type editor
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Path to a composite JSON file to open - optional
    #[arg(value_name = "FILE")]
    pub file_path: Option<PathBuf>,

    /// Create a new empty structure with this name instead of opening a file
    #[arg(short = 'n', long = "new", value_name = "NAME", conflicts_with = "file_path")]
    pub new_structure: Option<String>,

    /// Start with packing disabled (unaligned layout) for --new
    #[arg(short = 'u', long = "unaligned")]
    pub unaligned: bool,

    /// Enable debug logging to file (default: compedit.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}
