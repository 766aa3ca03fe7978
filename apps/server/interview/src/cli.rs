use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "interview", version, about = "AI interview platform services")]
pub struct Cli {
    /// Directory holding config.json and problems.toml
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Directory for interview.log (defaults to <config dir>/logs)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level; debug builds default to debug, release builds to info
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Print command output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the security-analysis route (default)
    Serve(ServeArgs),
    /// Run a source file on the execution API
    Run(RunArgs),
    /// List runtimes offered by the execution API
    Runtimes,
    /// List the coding round problems
    Problems,
    /// Print the repository id derived from a GitHub URL
    RepoId(RepoIdArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Address to bind, overriding config and INTERVIEW_BIND_ADDR
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Source file to run
    #[arg(long)]
    pub file: PathBuf,

    /// javascript, python, cpp or java; detected from the code when omitted
    #[arg(long)]
    pub language: Option<String>,

    /// File fed to the program's stdin
    #[arg(long, conflicts_with = "problem")]
    pub stdin_file: Option<PathBuf>,

    /// Runtime version, `*` for the latest
    #[arg(long = "runtime-version")]
    pub version: Option<String>,

    /// Run against every sample of a catalog problem and judge the output
    #[arg(long)]
    pub problem: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct RepoIdArgs {
    pub url: String,
}
