use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "sentiment")]
#[command(about = "Classify tweet sentiment against a remote /classify endpoint")]
#[command(version)]
pub struct Cli {
    /// Base URL of the classification service (ex: http://127.0.0.1:5000)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// RON configuration file
    #[arg(long, default_value = "sentiment.ron")]
    pub config: PathBuf,

    /// Classify a single tweet, print the result and exit
    #[arg(long, conflicts_with = "health")]
    pub tweet: Option<String>,

    /// Query the service health endpoint and exit
    #[arg(long)]
    pub health: bool,

    /// Where log output goes
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,

    /// Give up on a request after this many milliseconds
    #[arg(long)]
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum LogTarget {
    File,
    #[default]
    Terminal,
    Both,
    Off,
}
