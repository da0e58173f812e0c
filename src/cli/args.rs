//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Minimal command router: named commands, nested collections, readable error traces
///
/// Everything after the options is handed to the command router untouched;
/// the first token names the command.
#[derive(Parser, Debug)]
#[command(name = "cmdroute")]
#[command(author, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Directory holding a local .cmdroute.toml
    #[arg(short = 'C', long, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    /// Command name followed by its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
