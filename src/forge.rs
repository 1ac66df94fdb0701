use std::fmt;
use std::process::Command;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{CliError, ParamSpec, Result};

/// The external compiler/deployer.  Both calls block until the tool
/// exits.
pub trait BuildTool: Send + Sync {
	/// Run `inspect <target> abi` and return its stdout.
	fn inspect_abi(&self, target: &str) -> Result<String>;

	/// Run a `create` command and return its combined output.
	fn create(&self, command: &CreateCommand) -> Result<String>;
}

/// Arguments for `forge create`, kept as an argv so nothing is ever
/// re-split by a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommand {
	pub rpc_url: String,
	pub private_key: String,
	/// `<path>:<ContractName>`
	pub target: String,
	pub constructor_args: Vec<String>,
}

impl CreateCommand {
	pub fn args(&self) -> Vec<String> {
		let mut argv = vec![
			"create".to_owned(),
			"--rpc-url".to_owned(),
			self.rpc_url.clone(),
			"--private-key".to_owned(),
			self.private_key.clone(),
			self.target.clone(),
			"--broadcast".to_owned(),
		];
		if !self.constructor_args.is_empty() {
			argv.push("--constructor-args".to_owned());
			argv.extend(self.constructor_args.iter().cloned());
		}
		argv
	}
}

/// Printable form with the key masked.
impl fmt::Display for CreateCommand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let argv: Vec<String> = self
			.args()
			.into_iter()
			.map(|a| if a == self.private_key { "<redacted>".to_owned() } else { a })
			.collect();
		write!(f, "forge {}", argv.join(" "))
	}
}

/// Runs the real `forge` binary.
pub struct Forge {
	bin: String,
}

impl Forge {
	pub fn new(bin: impl Into<String>) -> Self {
		Self { bin: bin.into() }
	}

	fn run(&self, args: &[String]) -> Result<std::process::Output> {
		Command::new(&self.bin)
			.args(args)
			.output()
			.map_err(|e| CliError::Subprocess(format!("failed to run {}: {e}", self.bin)))
	}
}

impl BuildTool for Forge {
	fn inspect_abi(&self, target: &str) -> Result<String> {
		let args = ["inspect".to_owned(), target.to_owned(), "abi".to_owned()];
		log::debug!("{} {}", self.bin, args.join(" "));
		let output = self.run(&args)?;
		if !output.status.success() {
			return Err(subprocess_failure("forge inspect", &output));
		}
		Ok(String::from_utf8_lossy(&output.stdout).into_owned())
	}

	fn create(&self, command: &CreateCommand) -> Result<String> {
		log::debug!("{command}");
		let output = self.run(&command.args())?;
		if !output.status.success() {
			return Err(subprocess_failure("forge create", &output));
		}
		let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
		combined.push_str(&String::from_utf8_lossy(&output.stderr));
		Ok(combined)
	}
}

fn subprocess_failure(what: &str, output: &std::process::Output) -> CliError {
	let stderr = String::from_utf8_lossy(&output.stderr);
	let detail = if stderr.trim().is_empty() {
		String::from_utf8_lossy(&output.stdout).trim().to_owned()
	} else {
		stderr.trim().to_owned()
	};
	CliError::Subprocess(format!("{what} exited with {}: {detail}", output.status))
}

// -- ABI inspection --

#[derive(Deserialize)]
struct ConstructorEntry {
	#[serde(default)]
	inputs: Vec<AbiInput>,
}

#[derive(Deserialize)]
struct AbiInput {
	#[serde(default)]
	name: String,
	#[serde(rename = "type")]
	kind: String,
}

/// Parse `forge inspect ... abi` output and return the constructor's
/// declared inputs, or `None` when the contract has no constructor.
pub fn constructor_inputs(inspect_output: &str) -> Result<Option<Vec<ParamSpec>>> {
	let json: Value = serde_json::from_str(inspect_output.trim())
		.map_err(|e| CliError::Validation(format!("Error parsing ABI: {e}")))?;
	let entries = json.as_array().ok_or_else(|| {
		CliError::Validation("Invalid ABI format received from forge inspect.".into())
	})?;

	let Some(ctor) = entries
		.iter()
		.find(|e| e.get("type").and_then(Value::as_str) == Some("constructor"))
	else {
		return Ok(None);
	};

	let ctor: ConstructorEntry = serde_json::from_value(ctor.clone())
		.map_err(|e| CliError::Validation(format!("malformed constructor entry: {e}")))?;

	Ok(Some(
		ctor.inputs
			.into_iter()
			.map(|i| ParamSpec { name: i.name, kind: i.kind })
			.collect(),
	))
}

/// Pull `Deployed to:` and `Transaction hash:` out of `forge create` output.
pub fn parse_deployment(output: &str) -> (Option<String>, Option<String>) {
	let field = |label: &str| {
		output
			.lines()
			.find_map(|l| l.trim().strip_prefix(label))
			.map(|v| v.trim().to_owned())
	};
	(field("Deployed to:"), field("Transaction hash:"))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn create(args: &[&str]) -> CreateCommand {
		CreateCommand {
			rpc_url: "https://example-rpc".into(),
			private_key: "0xsecret".into(),
			target: "contracts/Foo.sol:Foo".into(),
			constructor_args: args.iter().map(|s| s.to_string()).collect(),
		}
	}

	#[test]
	fn create_argv_without_constructor_args() {
		assert_eq!(
			create(&[]).args(),
			[
				"create",
				"--rpc-url",
				"https://example-rpc",
				"--private-key",
				"0xsecret",
				"contracts/Foo.sol:Foo",
				"--broadcast"
			]
		);
	}

	#[test]
	fn constructor_args_come_last() {
		let argv = create(&["0xabc", "100"]).args();
		assert_eq!(argv[7..], ["--constructor-args", "0xabc", "100"]);
	}

	#[test]
	fn display_masks_private_key() {
		let shown = create(&[]).to_string();
		assert!(!shown.contains("0xsecret"));
		assert!(shown.starts_with("forge create --rpc-url https://example-rpc --private-key <redacted>"));
	}

	#[test]
	fn no_constructor_in_empty_abi() {
		assert_eq!(constructor_inputs("[]\n").unwrap(), None);
	}

	#[test]
	fn constructor_inputs_keep_declaration_order() {
		let abi = r#"[
			{"type":"function","name":"x","inputs":[],"outputs":[]},
			{"type":"constructor","stateMutability":"nonpayable","inputs":[
				{"name":"owner","type":"address","internalType":"address"},
				{"name":"cap","type":"uint256","internalType":"uint256"}
			]}
		]"#;
		let inputs = constructor_inputs(abi).unwrap().unwrap();
		let rendered: Vec<String> = inputs.iter().map(ToString::to_string).collect();
		assert_eq!(rendered, ["<owner:address>", "<cap:uint256>"]);
	}

	#[test]
	fn rejects_non_json_and_non_array() {
		assert_eq!(constructor_inputs("Error: no such contract").unwrap_err().kind(), "validation");
		let err = constructor_inputs(r#"{"abi":[]}"#).unwrap_err();
		assert!(err.to_string().contains("Invalid ABI format"));
	}

	#[test]
	fn extracts_deployment_info() {
		let out = "No files changed, compilation skipped\n\
			Deployer: 0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266\n\
			Deployed to: 0x5FbDB2315678afecb367f032d93F642f64180aa3\n\
			Transaction hash: 0x1234\n";
		let (addr, hash) = parse_deployment(out);
		assert_eq!(addr.as_deref(), Some("0x5FbDB2315678afecb367f032d93F642f64180aa3"));
		assert_eq!(hash.as_deref(), Some("0x1234"));
		assert_eq!(parse_deployment("nothing"), (None, None));
	}
}
