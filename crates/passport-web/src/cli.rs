//! Server flags.
//!
//! | Option | Env | Default |
//! |--------|-----|---------|
//! | `--bind` | `PASSPORT_BIND` | `0.0.0.0:3000` |
//! | `--static-dir` | `PASSPORT_STATIC_DIR` | `public` |
//! | `--log-format` | `PASSPORT_LOG_FORMAT` | `compact` |
//!
//! Upstream keys and base URLs are read from the environment, not flags.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Passport - random traveller profiles from four public APIs
#[derive(Debug, Parser)]
#[command(name = "passport", author, version, about = "Serve aggregated traveller profiles")]
pub struct Cli {
    /// Address to listen on.
    #[arg(long, env = "PASSPORT_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Directory served for non-API paths.
    #[arg(long, env = "PASSPORT_STATIC_DIR", default_value = "public")]
    pub static_dir: PathBuf,

    /// Log output format.
    #[arg(long, env = "PASSPORT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}
