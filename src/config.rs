use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Public endpoint used when nothing else is configured.
pub const DEFAULT_RPC_URL: &str = "https://rpc.soneium.org";
pub const DEFAULT_FORGE_BIN: &str = "forge";

/// Settings that may live in `~/.evm-cli/config.toml`.  The signing key
/// is never read from this file, only from the environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
	pub rpc_url: Option<String>,
	pub forge_bin: Option<String>,
}

impl FileConfig {
	/// Directory where CLI state is stored (~/.evm-cli/).
	pub fn dir() -> Option<PathBuf> {
		dirs::home_dir().map(|home| home.join(".evm-cli"))
	}

	/// Path to the config file.
	pub fn path() -> Option<PathBuf> {
		Self::dir().map(|dir| dir.join("config.toml"))
	}

	/// Load the config file, falling back to defaults if it does not exist.
	pub fn load() -> anyhow::Result<Self> {
		match Self::path() {
			Some(path) if path.exists() => {
				let content = std::fs::read_to_string(&path)?;
				Ok(toml::from_str(&content)?)
			}
			_ => Ok(Self::default()),
		}
	}
}

/// Resolved connection settings, fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Config {
	pub rpc_url: String,
	pub private_key: Option<String>,
	/// Project root; the transaction log and `out/` live under it.
	pub root: PathBuf,
	pub forge_bin: String,
}

impl Config {
	/// Load from the process environment on top of the config file.
	pub fn load() -> anyhow::Result<Self> {
		let file = FileConfig::load()?;
		let cwd = std::env::current_dir()?;
		Ok(Self::resolve(&file, cwd, |key| std::env::var(key).ok()))
	}

	/// Merge the config file with environment lookups.  Empty values are
	/// treated as unset, so `PRIVATE_KEY=` disables signing.
	pub fn resolve(
		file: &FileConfig,
		cwd: PathBuf,
		env: impl Fn(&str) -> Option<String>,
	) -> Self {
		let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());

		let rpc_url = var("RPC_URL")
			.or_else(|| file.rpc_url.clone())
			.unwrap_or_else(|| DEFAULT_RPC_URL.to_owned());
		let forge_bin = var("FORGE_BIN")
			.or_else(|| file.forge_bin.clone())
			.unwrap_or_else(|| DEFAULT_FORGE_BIN.to_owned());
		let root = var("PROJECT_ROOT").map(PathBuf::from).unwrap_or(cwd);

		Self {
			rpc_url,
			private_key: var("PRIVATE_KEY").map(|k| k.trim().to_owned()),
			root,
			forge_bin,
		}
	}

	/// Apply global CLI flags, which win over everything else.
	pub fn with_overrides(mut self, rpc_url: Option<&str>, root: Option<&Path>) -> Self {
		if let Some(url) = rpc_url {
			self.rpc_url = url.to_owned();
		}
		if let Some(root) = root {
			self.root = root.to_path_buf();
		}
		self
	}

	pub fn log_path(&self) -> PathBuf {
		self.root.join("transactions.log")
	}

	pub fn artifacts_dir(&self) -> PathBuf {
		self.root.join("out")
	}

	pub fn has_signer(&self) -> bool {
		self.private_key.is_some()
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |key| map.get(key).cloned()
	}

	#[test]
	fn defaults_are_sensible() {
		let c = Config::resolve(&FileConfig::default(), PathBuf::from("/proj"), env_of(&[]));
		assert_eq!(c.rpc_url, DEFAULT_RPC_URL);
		assert_eq!(c.forge_bin, "forge");
		assert!(c.private_key.is_none());
		assert_eq!(c.log_path(), PathBuf::from("/proj/transactions.log"));
		assert_eq!(c.artifacts_dir(), PathBuf::from("/proj/out"));
	}

	#[test]
	fn env_beats_file_and_empty_key_disables_signing() {
		let file = FileConfig {
			rpc_url: Some("https://from-file".into()),
			forge_bin: Some("/opt/forge".into()),
		};
		let c = Config::resolve(
			&file,
			PathBuf::from("/proj"),
			env_of(&[("RPC_URL", "https://example-rpc"), ("PRIVATE_KEY", "")]),
		);
		assert_eq!(c.rpc_url, "https://example-rpc");
		assert_eq!(c.forge_bin, "/opt/forge");
		assert!(!c.has_signer());
	}

	#[test]
	fn file_used_when_env_missing() {
		let file = FileConfig {
			rpc_url: Some("https://from-file".into()),
			forge_bin: None,
		};
		let c = Config::resolve(&file, PathBuf::from("/proj"), env_of(&[("PRIVATE_KEY", "0xabc")]));
		assert_eq!(c.rpc_url, "https://from-file");
		assert_eq!(c.private_key.as_deref(), Some("0xabc"));
	}

	#[test]
	fn cli_flags_override() {
		let c = Config::resolve(
			&FileConfig::default(),
			PathBuf::from("/proj"),
			env_of(&[("PROJECT_ROOT", "/env-root")]),
		);
		assert_eq!(c.root, PathBuf::from("/env-root"));

		let c = c.with_overrides(Some("http://localhost:8545"), Some(Path::new("/flag-root")));
		assert_eq!(c.rpc_url, "http://localhost:8545");
		assert_eq!(c.root, PathBuf::from("/flag-root"));
	}

	#[test]
	fn file_config_parses_partial_toml() {
		let parsed: FileConfig = toml::from_str("rpc_url = \"https://x\"\n").unwrap();
		assert_eq!(parsed.rpc_url.as_deref(), Some("https://x"));
		assert!(parsed.forge_bin.is_none());
	}
}
