//! Server configuration.
//!
//! Values come from three layers, highest priority first: command line (or
//! the matching environment variable), an optional YAML file given with
//! `--config`, and built-in defaults.
//!
//! ```yaml
//! port: "8080"
//! root_dir: /srv/www
//! backlog: 128
//! addr: 127.0.0.1
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use serde::Deserialize;

pub const DEFAULT_PORT: &str = "8080";
pub const DEFAULT_ADDR: &str = "0.0.0.0";
pub const DEFAULT_BACKLOG: u32 = 1024;

/// Command-line options.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "shelf")]
#[command(about = "Minimal static file server with directory listings")]
#[command(version)]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "SHELF_PORT")]
    pub port: Option<String>,

    /// Directory to serve
    #[arg(short, long = "root-dir", env = "SHELF_ROOT")]
    pub root_dir: Option<PathBuf>,

    /// Maximum number of pending connections
    #[arg(short, long, env = "SHELF_BACKLOG")]
    pub backlog: Option<u32>,

    /// Address to bind
    #[arg(long, env = "SHELF_ADDR")]
    pub addr: Option<String>,

    /// YAML file with default values for the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "SHELF_LOG")]
    pub log_level: String,
}

/// Contents of a YAML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub port: Option<String>,
    pub root_dir: Option<PathBuf>,
    pub backlog: Option<u32>,
    pub addr: Option<String>,
}

impl FileConfig {
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("invalid config file")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("in {}", path.display()))
    }
}

/// Validated configuration the server starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: String,
    /// Decimal port number; "0" asks the OS for a free port
    pub port: String,
    /// Absolute, canonical directory being served
    pub root_dir: PathBuf,
    pub backlog: u32,
}

impl Config {
    /// Layers command line over config file over defaults, then validates.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    pub fn merge(cli: &Cli, file: FileConfig) -> anyhow::Result<Self> {
        let root_dir = match cli.root_dir.clone().or(file.root_dir) {
            Some(dir) => dir,
            None => std::env::current_dir().context("failed to read current directory")?,
        };

        let config = Self {
            addr: cli
                .addr
                .clone()
                .or(file.addr)
                .unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            port: cli
                .port
                .clone()
                .or(file.port)
                .unwrap_or_else(|| DEFAULT_PORT.to_string()),
            root_dir,
            backlog: cli.backlog.or(file.backlog).unwrap_or(DEFAULT_BACKLOG),
        };
        config.validate()
    }

    /// Checks every field and canonicalizes the root directory.
    pub fn validate(mut self) -> anyhow::Result<Self> {
        if !is_port(&self.port) {
            bail!("port must be a number between 0 and 65535, got {:?}", self.port);
        }
        if self.backlog == 0 {
            bail!("backlog must be positive");
        }
        if !self.root_dir.is_dir() {
            bail!("\"{}\" is not a directory", self.root_dir.display());
        }
        self.root_dir = self
            .root_dir
            .canonicalize()
            .with_context(|| format!("failed to resolve {}", self.root_dir.display()))?;
        Ok(self)
    }

    /// The port as a number. Valid after [`Config::validate`].
    pub fn port_number(&self) -> anyhow::Result<u16> {
        self.port
            .parse()
            .with_context(|| format!("invalid port {:?}", self.port))
    }
}

fn is_port(port: &str) -> bool {
    !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) && port.parse::<u16>().is_ok()
}
