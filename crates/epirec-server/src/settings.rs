//! Server configuration.
//!
//! Layered lowest to highest: built-in defaults, the TOML file, then
//! `EPIREC_*` environment variables (`EPIREC_PORT=9000`, ...).

use std::path::PathBuf;

use config::{ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// SQLite database file. `:memory:` opens a throwaway in-memory store.
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Load from `path` (which may be absent) and the environment.
  pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
    defaults()?
      .add_source(File::from(path).required(false))
      .add_source(Environment::with_prefix("EPIREC"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8000)?
    .set_default("store_path", "records.db")
}
