use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "MRKV_CONFIG";

/// Configuration file used when `MRKV_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "mrkv.toml";

/// Server settings, read from TOML. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	/// SQLite store used by `/v1/save` and `/v1/load`, and loaded at startup if present.
	pub store: PathBuf,
	pub seed: u64,
	/// Chain length used when `/v1/generate` has no `length` parameter.
	pub default_length: usize,
	/// Upper bound on any requested chain length.
	pub max_length: usize,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_owned(),
			port: 5000,
			store: PathBuf::from("data/corpus.mrkv"),
			seed: 0,
			default_length: 20,
			max_length: 1000,
		}
	}
}

impl ServerConfig {
	/// Loads the configuration named by `MRKV_CONFIG`, or `mrkv.toml`.
	///
	/// A missing file gives the defaults. An unreadable or malformed file is
	/// logged and also gives the defaults.
	pub fn load() -> Self {
		let path = env::var_os(CONFIG_ENV)
			.map(PathBuf::from)
			.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
		Self::load_from(&path)
	}

	pub fn load_from(path: &Path) -> Self {
		if !path.exists() {
			return Self::default();
		}

		let content = match std::fs::read_to_string(path) {
			Ok(content) => content,
			Err(err) => {
				tracing::warn!("Failed to read config at {:?}: {}", path, err);
				return Self::default();
			}
		};

		match toml::from_str(&content) {
			Ok(config) => config,
			Err(err) => {
				tracing::warn!("Failed to parse config at {:?}: {}", path, err);
				Self::default()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_file_gives_defaults() {
		let config: ServerConfig = toml::from_str("").unwrap();
		assert_eq!(config, ServerConfig::default());
	}

	#[test]
	fn partial_file_keeps_other_defaults() {
		let config: ServerConfig = toml::from_str("port = 8080\nseed = 11111\nstore = \"alice.mrkv\"").unwrap();
		assert_eq!(config.port, 8080);
		assert_eq!(config.seed, 11111);
		assert_eq!(config.store, PathBuf::from("alice.mrkv"));
		assert_eq!(config.host, "127.0.0.1");
		assert_eq!(config.default_length, 20);
		assert_eq!(config.max_length, 1000);
	}

	#[test]
	fn missing_file_gives_defaults() {
		let config = ServerConfig::load_from(Path::new("/definitely/not/here/mrkv.toml"));
		assert_eq!(config, ServerConfig::default());
	}
}
