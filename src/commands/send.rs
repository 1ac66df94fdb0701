use colored::Colorize;

use crate::commands::Context;
use crate::error::Result;
use crate::units::parse_ether;

/// Transfer `amount` ETH to `to`.
///
/// The hash is logged as soon as the node accepts the transaction, so
/// the log line exists whether or not confirmation succeeds.
pub async fn run(ctx: &Context, to: &str, amount: &str) -> Result<()> {
	ctx.chain.signer_address()?;
	let value = parse_ether(amount)?;

	println!("Sending transaction...");
	let tx_hash = ctx.chain.send_value(to, value).await?;
	println!("{}", format!("Transaction sent! Hash: {tx_hash}").green());
	ctx.tx_log
		.record(&format!("Sent {amount} ETH to {to} - Hash: {tx_hash}"))
		.await;

	let block = ctx.chain.wait_for_confirmation(&tx_hash).await?;
	match block {
		Some(n) => println!("{}", format!("Transaction confirmed in block {n}!").green()),
		None => println!("{}", "Transaction confirmed!".green()),
	}
	Ok(())
}
