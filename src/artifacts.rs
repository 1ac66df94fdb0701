use std::path::{Path, PathBuf};

use ethers::abi::Abi;
use serde_json::Value;

use crate::error::{CliError, Result};

/// Suffix forge gives each per-source directory under `out/`.
const SOURCE_SUFFIX: &str = ".sol";
/// Suffix of the compiled artifact files inside those directories.
const ARTIFACT_SUFFIX: &str = ".json";

/// Find the first compiled artifact under `out_dir`.
///
/// Candidates are `out/<File>.sol/<Contract>.json`.  Both levels are
/// visited in name order, so the pick is stable across filesystems but
/// still blind to which contract the caller meant.
pub fn locate_abi(out_dir: &Path) -> Result<PathBuf> {
	if !out_dir.is_dir() {
		return Err(CliError::Artifact(format!(
			"The `out/` directory does not exist at {}! Compile the contract first.",
			out_dir.display()
		)));
	}

	for folder in sorted_entries(out_dir)? {
		if !folder.is_dir() || !has_suffix(&folder, SOURCE_SUFFIX) {
			continue;
		}
		let found = sorted_entries(&folder)?
			.into_iter()
			.find(|file| file.is_file() && has_suffix(file, ARTIFACT_SUFFIX));
		if let Some(file) = found {
			return Ok(file);
		}
	}

	Err(CliError::Artifact(
		"No ABI file found! Please provide the correct ABI file path with --abi.".into(),
	))
}

/// Read an artifact and return its `abi` array as a typed interface.
pub fn load_abi(path: &Path) -> Result<Abi> {
	let content = std::fs::read_to_string(path).map_err(|e| {
		CliError::Artifact(format!("could not read {}: {e}", path.display()))
	})?;
	let json: Value = serde_json::from_str(&content).map_err(|e| {
		CliError::Artifact(format!("{} is not valid JSON: {e}", path.display()))
	})?;

	let abi = match json.get("abi") {
		Some(abi @ Value::Array(_)) => abi.clone(),
		_ => {
			return Err(CliError::Artifact(
				"Invalid ABI file format! Expected an object with an 'abi' key.".into(),
			))
		}
	};

	serde_json::from_value(abi).map_err(|e| {
		CliError::Artifact(format!("{} has a malformed ABI: {e}", path.display()))
	})
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
	let read = std::fs::read_dir(dir).map_err(|e| {
		CliError::Artifact(format!("could not list {}: {e}", dir.display()))
	})?;
	let mut entries: Vec<PathBuf> = read.filter_map(|e| e.ok().map(|e| e.path())).collect();
	entries.sort();
	Ok(entries)
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
	path.file_name()
		.and_then(|n| n.to_str())
		.is_some_and(|n| n.ends_with(suffix))
}
