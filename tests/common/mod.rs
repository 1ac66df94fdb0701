//! Stand-ins for the node and for forge so command handlers can run
//! without a network or a toolchain.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ethers::types::{Address, Bytes, U256};

use evm_cli::chain::Chain;
use evm_cli::commands::Context;
use evm_cli::config::Config;
use evm_cli::error::{CliError, Result};
use evm_cli::forge::{BuildTool, CreateCommand};

/// Shared record of every external call a mock received.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub const SIGNER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

pub struct MockChain {
	pub signer: Option<Address>,
	pub balance: U256,
	pub tx_hash: String,
	pub call_output: Bytes,
	/// `Err` makes confirmation fail with a network error.
	pub confirmation: std::result::Result<Option<u64>, String>,
	/// Log file inspected when confirmation is awaited.
	pub log_path: PathBuf,
	pub journal: Journal,
}

impl MockChain {
	pub fn new(signed: bool, log_path: &Path) -> Self {
		Self {
			signer: signed.then(|| SIGNER.parse().unwrap()),
			balance: U256::zero(),
			tx_hash: "0xdeadbeef".into(),
			call_output: Bytes::default(),
			confirmation: Ok(Some(1)),
			log_path: log_path.to_path_buf(),
			journal: Journal::default(),
		}
	}

	fn note(&self, entry: String) {
		self.journal.lock().unwrap().push(entry);
	}
}

#[async_trait]
impl Chain for MockChain {
	fn signer_address(&self) -> Result<Address> {
		self.signer
			.ok_or_else(|| CliError::Config("Private key not found!".into()))
	}

	async fn balance(&self, address: Address) -> Result<U256> {
		self.note(format!("balance {address:#x}"));
		Ok(self.balance)
	}

	async fn send_value(&self, to: &str, value: U256) -> Result<String> {
		self.note(format!("send_value {to} {value}"));
		Ok(self.tx_hash.clone())
	}

	async fn call(&self, to: &str, data: Bytes) -> Result<Bytes> {
		self.note(format!("call {to} {data}"));
		Ok(self.call_output.clone())
	}

	async fn send_call(&self, to: &str, data: Bytes) -> Result<String> {
		self.note(format!("send_call {to} {data}"));
		Ok(self.tx_hash.clone())
	}

	async fn wait_for_confirmation(&self, tx_hash: &str) -> Result<Option<u64>> {
		let lines = std::fs::read_to_string(&self.log_path)
			.map(|c| c.lines().count())
			.unwrap_or(0);
		self.note(format!("confirm {tx_hash} log_lines={lines}"));
		self.confirmation.clone().map_err(CliError::Network)
	}
}

pub struct MockForge {
	pub inspect_output: String,
	/// `Some` makes `create` fail with this message.
	pub create_error: Option<String>,
	pub journal: Journal,
	pub created: Arc<Mutex<Vec<CreateCommand>>>,
}

impl MockForge {
	pub fn new(inspect_output: &str) -> Self {
		Self {
			inspect_output: inspect_output.into(),
			create_error: None,
			journal: Journal::default(),
			created: Arc::default(),
		}
	}
}

impl BuildTool for MockForge {
	fn inspect_abi(&self, target: &str) -> Result<String> {
		self.journal.lock().unwrap().push(format!("inspect {target} abi"));
		Ok(self.inspect_output.clone())
	}

	fn create(&self, command: &CreateCommand) -> Result<String> {
		self.journal.lock().unwrap().push(format!("create {}", command.args().join(" ")));
		self.created.lock().unwrap().push(command.clone());
		match &self.create_error {
			Some(msg) => Err(CliError::Subprocess(msg.clone())),
			None => Ok(format!(
				"Deployer: {SIGNER}\nDeployed to: {CONTRACT}\nTransaction hash: 0xfeed\n"
			)),
		}
	}
}

pub fn config(root: &Path, signed: bool) -> Config {
	Config {
		rpc_url: "https://example-rpc".into(),
		private_key: signed.then(|| format!("0xabc{}", "0".repeat(61))),
		root: root.to_path_buf(),
		forge_bin: "forge".into(),
	}
}

pub fn context(config: Config, chain: MockChain, forge: MockForge) -> Context {
	Context::new(config, Box::new(chain), Box::new(forge))
}

pub fn log_lines(config: &Config) -> Vec<String> {
	std::fs::read_to_string(config.log_path())
		.map(|c| c.lines().map(str::to_owned).collect())
		.unwrap_or_default()
}
