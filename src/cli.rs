use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
	name = "evm-cli",
	about = "Check balances, send ETH, deploy with forge and call contracts on EVM chains.",
	version
)]
pub struct Cli {
	/// Override RPC endpoint URL (defaults to $RPC_URL).
	#[arg(long, global = true)]
	pub rpc_url: Option<String>,

	/// Project root holding `out/` and `transactions.log` (defaults to $PROJECT_ROOT or the current directory).
	#[arg(long, global = true)]
	pub root: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
	/// Check wallet balance.
	Balance,

	/// Send ETH to another address.
	Send {
		/// Recipient address.
		to: String,

		/// Amount of ETH to send, e.g. 0.5.
		amount: String,
	},

	/// Deploy a smart contract using forge.
	Deploy {
		/// Path to the Solidity source file.
		contract_path: String,

		/// Name of the contract inside the file.
		contract_name: String,

		/// Constructor arguments, in declaration order.
		#[arg(long, num_args = 1.., allow_negative_numbers = true)]
		constructor_args: Option<Vec<String>>,
	},

	/// Call a function on an existing contract.
	Call {
		/// The contract address.
		contract_address: String,

		/// Function name to call.
		function_name: String,

		/// Arguments for the function, in declaration order.
		#[arg(allow_negative_numbers = true)]
		args: Vec<String>,

		/// Artifact JSON to read the ABI from instead of searching `out/`.
		#[arg(long)]
		abi: Option<PathBuf>,
	},
}
