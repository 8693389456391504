//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// keyremap - device-specific input remapping.
///
/// `kr migrate` brings an existing configuration tree up to the current
/// release and is safe to run any number of times.
#[derive(Parser, Debug)]
#[command(name = "kr", version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Config root directory (defaults to ~/.config/keyremap)
    #[arg(long, global = true, value_name = "DIR", env = "KR_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Configuration ===
    /// Migrate the configuration tree to the current release
    Migrate(MigrateArgs),

    /// Show current configuration
    Config(ConfigArgs),

    // === Utilities ===
    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// === Argument Structs ===

#[derive(Parser, Debug)]
pub struct MigrateArgs {}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show the config file path only
    #[arg(long)]
    pub path: bool,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
