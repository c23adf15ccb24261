//! Command line argument parsing
//!
//! Subcommands:
//! - `import`: Run one import session for a project directory
//! - `show-config`: Show configuration discovery information
//! - `init-config`: Write a default user configuration file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug)]
pub enum ExecutionMode {
    Import(ImportOptions),
    ShowConfig,
    InitConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    pub project_dir: PathBuf,
    pub config_override: Option<PathBuf>,
    pub hinted_projects: Vec<PathBuf>,
    pub skip: bool,
    pub json: bool,
    pub verbose: bool,
}

#[derive(Debug, Parser)]
#[command(name = "gradle-import")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Import a Gradle project headlessly and fail if any import task fails")]
#[command(long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import the Gradle project in a directory
    Import {
        /// Project base directory (default: current directory)
        project_dir: Option<PathBuf>,
        /// Configuration file path
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,
        /// Build file to import, relative to the project directory (repeatable)
        #[arg(long = "hint", value_name = "PATH")]
        hints: Vec<PathBuf>,
        /// Skip the import session
        #[arg(long = "skip")]
        skip: bool,
        /// Print the import report as JSON
        #[arg(long = "json")]
        json: bool,
        /// Enable verbose output
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },
    /// Show configuration discovery information
    ShowConfig,
    /// Create a default configuration file in the home directory
    InitConfig,
}

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn mode(&self) -> Result<ExecutionMode, String> {
        match &self.command {
            Some(Commands::Import {
                project_dir,
                config,
                hints,
                skip,
                json,
                verbose,
            }) => Ok(ExecutionMode::Import(ImportOptions {
                project_dir: project_dir.clone().unwrap_or_else(|| PathBuf::from(".")),
                config_override: config.clone(),
                hinted_projects: hints.clone(),
                skip: *skip,
                json: *json,
                verbose: *verbose,
            })),
            Some(Commands::ShowConfig) => Ok(ExecutionMode::ShowConfig),
            Some(Commands::InitConfig) => Ok(ExecutionMode::InitConfig),
            None => Err("No command given".to_string()),
        }
    }
}
