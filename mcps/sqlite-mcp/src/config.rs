//! Configuration for SQLite MCP Server
//!
//! Settings are resolved once at startup, lowest priority first:
//! 1. Built-in defaults
//! 2. TOML file at `--config` / `SQLITE_MCP_CONFIG_PATH`, else `~/.binks/sqlite.toml`
//! 3. Command-line flags and `SQLITE_MCP_*` environment variables
//!
//! The resulting [`Settings`] value is passed explicitly to every component.

use anyhow::{bail, Context, Result};
use clap::{builder::BoolishValueParser, Parser};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::resolver::expand_path;

/// Default cap on rows returned per statement
pub const DEFAULT_MAX_ROWS: usize = 1000;

/// Command-line arguments
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "sqlite-mcp")]
#[command(about = "MCP server for running SQL against SQLite database files")]
pub struct Args {
    /// Database file used when a tool call does not pass `database_path`
    #[arg(long, env = "SQLITE_MCP_DB_PATH")]
    pub db_path: Option<String>,

    /// Directory holding saved query results
    #[arg(long, env = "SQLITE_MCP_STORAGE_PATH")]
    pub storage_path: Option<String>,

    /// Open every connection read-only; `--read-only=false` overrides the file
    #[arg(
        long,
        env = "SQLITE_MCP_READ_ONLY",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub read_only: Option<bool>,

    /// Maximum rows returned per statement (default: 1000)
    #[arg(long, env = "SQLITE_MCP_MAX_ROWS")]
    pub max_rows: Option<usize>,

    /// Path to the TOML config file
    #[arg(long, env = "SQLITE_MCP_CONFIG_PATH")]
    pub config: Option<PathBuf>,
}

/// Contents of the TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub query: QuerySection,
    #[serde(default)]
    pub storage: StorageSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSection {
    /// Default SQLite database file
    pub path: Option<String>,

    /// Open connections read-only
    /// Default: false
    #[serde(default)]
    pub read_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuerySection {
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

impl Default for QuerySection {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSection {
    /// Directory for saved results
    /// Default: ~/.binks/sqlite-results
    pub path: Option<String>,
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

fn default_storage_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".binks")
        .join("sqlite-results")
}

impl FileConfig {
    /// Read the config file, treating a missing file as empty
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match dirs::home_dir() {
                Some(home) => home.join(".binks").join("sqlite.toml"),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            tracing::info!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        tracing::info!("Loading config from {:?}", path);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }
}

/// Process-wide settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Upper bound on rows returned per statement
    pub max_rows: usize,
    /// Absolute path of the default database, if any
    pub default_db_path: Option<PathBuf>,
    /// Whether connections are opened read-only
    pub read_only: bool,
    /// Directory of saved query results
    pub storage_path: PathBuf,
}

impl Settings {
    /// Resolve settings from the config file and command line
    pub fn load(args: &Args) -> Result<Self> {
        let file = FileConfig::load(args.config.as_deref())?;
        Self::merge(file, args)
    }

    /// Layer command-line values over file values
    pub fn merge(file: FileConfig, args: &Args) -> Result<Self> {
        let max_rows = args.max_rows.unwrap_or(file.query.max_rows);
        if max_rows == 0 {
            bail!("max_rows must be at least 1");
        }

        let default_db_path = args
            .db_path
            .as_deref()
            .or(file.database.path.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(expand_path);

        let storage_path = args
            .storage_path
            .as_deref()
            .or(file.storage.path.as_deref())
            .map(expand_path)
            .unwrap_or_else(default_storage_path);

        Ok(Self {
            max_rows,
            default_db_path,
            read_only: args.read_only.unwrap_or(file.database.read_only),
            storage_path,
        })
    }

    /// Settings for embedding or tests: writable, default row cap
    pub fn new(default_db_path: Option<PathBuf>, storage_path: PathBuf) -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            default_db_path,
            read_only: false,
            storage_path,
        }
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows.max(1);
        self
    }

    /// Row cap for one call
    ///
    /// Missing or non-positive requests use the default; larger requests are
    /// clamped to it.
    pub fn effective_max_rows(&self, requested: Option<i64>) -> usize {
        match requested {
            Some(n) if n > 0 => usize::try_from(n)
                .unwrap_or(usize::MAX)
                .min(self.max_rows),
            _ => self.max_rows,
        }
    }
}
