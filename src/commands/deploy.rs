use colored::Colorize;

use crate::commands::Context;
use crate::error::{CliError, Result};
use crate::forge::{self, CreateCommand};
use crate::tx_log::args_or_none;

/// Deploy `<contract_path>:<contract_name>` with `forge create`, after
/// checking the constructor's inputs with `forge inspect`.
pub async fn run(
	ctx: &Context,
	contract_path: &str,
	contract_name: &str,
	constructor_args: &[String],
) -> Result<()> {
	let private_key = ctx.require_private_key()?;
	let target = format!("{contract_path}:{contract_name}");

	// 1. Inspect the constructor.
	println!("Checking contract constructor...");
	let abi_output = ctx.build_tool.inspect_abi(&target)?;
	let ctor_inputs = forge::constructor_inputs(&abi_output)?.unwrap_or_default();

	// 2. Refuse to deploy with missing arguments.
	if !ctor_inputs.is_empty() && constructor_args.is_empty() {
		return Err(CliError::MissingConstructorArgs(ctor_inputs));
	}
	if !ctor_inputs.is_empty() && ctor_inputs.len() != constructor_args.len() {
		log::warn!(
			"constructor declares {} input(s) but {} argument(s) were given",
			ctor_inputs.len(),
			constructor_args.len()
		);
	}
	// Arguments only reach forge when the constructor takes inputs.
	let forwarded_args = if ctor_inputs.is_empty() {
		if !constructor_args.is_empty() {
			log::warn!("constructor takes no inputs; ignoring --constructor-args");
		}
		Vec::new()
	} else {
		constructor_args.to_vec()
	};
	println!("{}", "Constructor check complete!".green());

	// 3. Deploy.
	let command = CreateCommand {
		rpc_url: ctx.config.rpc_url.clone(),
		private_key: private_key.to_owned(),
		target: target.clone(),
		constructor_args: forwarded_args,
	};
	println!("Deploying contract...");
	let output = ctx.build_tool.create(&command)?;

	println!("{}", "Contract deployed successfully!".green());
	println!("{}", output.blue());
	let (address, tx_hash) = forge::parse_deployment(&output);
	if let Some(address) = &address {
		println!("Contract address: {address}");
	}
	if let Some(tx_hash) = &tx_hash {
		println!("Transaction hash: {tx_hash}");
	}

	ctx.tx_log
		.record(&format!(
			"Deployed contract: {target} with args: {}",
			args_or_none(constructor_args)
		))
		.await;
	Ok(())
}
