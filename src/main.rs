//! keyremap CLI - device-specific input remapping.
//!
//! The `migrate` command is run at every application start to bring the
//! on-disk configuration up to the current release.
#![forbid(unsafe_code)]

use clap::{CommandFactory, Parser};

use kr::cli::{Cli, Commands, CompletionsArgs, ConfigArgs};
use kr::error::{KrError, Result};
use kr::logging::init_logging;
use kr::migrate::migrate;
use kr::paths::ConfigDirs;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        if let Some(suggestion) = e.suggestion() {
            eprintln!("hint: {suggestion}");
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        // arg_required_else_help shows usage before we ever get here.
        None => Ok(()),
        Some(Commands::Migrate(_)) => cmd_migrate(cli),
        Some(Commands::Config(args)) => cmd_config(cli, args),
        Some(Commands::Version) => cmd_version(),
        Some(Commands::Completions(args)) => cmd_completions(args),
    }
}

/// Resolve the config root: explicit flag first, discovery otherwise.
fn config_dirs(cli: &Cli) -> Result<ConfigDirs> {
    match &cli.config_dir {
        Some(dir) => Ok(ConfigDirs::at(dir)),
        None => ConfigDirs::discover(),
    }
}

fn cmd_migrate(cli: &Cli) -> Result<()> {
    migrate(config_dirs(cli)?)
}

fn cmd_config(cli: &Cli, args: &ConfigArgs) -> Result<()> {
    let dirs = config_dirs(cli)?;
    let path = dirs.config_file();
    if args.path {
        println!("{}", path.display());
        return Ok(());
    }
    if !path.exists() {
        return Err(KrError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }
    print!("{}", std::fs::read_to_string(&path)?);
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_version() -> Result<()> {
    println!("kr {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_completions(args: &CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "kr", &mut std::io::stdout());
    Ok(())
}
