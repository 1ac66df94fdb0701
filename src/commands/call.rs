use std::path::Path;

use colored::Colorize;

use crate::abi;
use crate::artifacts;
use crate::commands::Context;
use crate::error::Result;
use crate::tx_log::args_or_none;

/// Call `function_name` on a deployed contract.
///
/// The ABI comes from `abi_path` when given, otherwise from the first
/// artifact found under `<root>/out`.
pub async fn run(
	ctx: &Context,
	contract_address: &str,
	function_name: &str,
	args: &[String],
	abi_path: Option<&Path>,
) -> Result<()> {
	let abi_file = match abi_path {
		Some(path) => path.to_path_buf(),
		None => {
			let detected = artifacts::locate_abi(&ctx.config.artifacts_dir())?;
			println!("{}", format!("Auto-detected ABI: {}", detected.display()).yellow());
			log::warn!(
				"ABI was picked from {} without matching the contract; pass --abi to be explicit",
				detected.display()
			);
			detected
		}
	};

	let interface = artifacts::load_abi(&abi_file)?;
	let call = abi::prepare_call(&interface, function_name, args)?;

	println!("Calling function {function_name}...");
	if call.is_read_only() {
		let output = ctx.chain.call(contract_address, call.calldata.clone()).await?;
		let result = call.format_output(&output)?;
		println!("{}", "Function executed successfully!".green());
		println!("{}", format!("\nResult: {result}\n").green());
	} else {
		ctx.chain.signer_address()?;
		let tx_hash = ctx.chain.send_call(contract_address, call.calldata.clone()).await?;
		println!("{}", format!("Transaction sent! Hash: {tx_hash}").green());
		let block = ctx.chain.wait_for_confirmation(&tx_hash).await?;
		match block {
			Some(n) => println!("{}", format!("Function executed in block {n}!").green()),
			None => println!("{}", "Function executed successfully!".green()),
		}
	}

	ctx.tx_log
		.record(&format!(
			"Called {function_name} on {contract_address} with args {}",
			args_or_none(args)
		))
		.await;
	Ok(())
}
