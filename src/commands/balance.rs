use colored::Colorize;

use crate::commands::Context;
use crate::error::Result;
use crate::units::format_ether;

/// Print the native balance of the configured wallet.
pub async fn run(ctx: &Context) -> Result<()> {
	let address = ctx.chain.signer_address()?;

	println!("Fetching balance of {address:#x}...");
	let wei = ctx.chain.balance(address).await?;
	log::debug!("balance of {address:#x}: {wei} wei");

	println!("{}", format!("Balance: {} ETH", format_ether(wei)).green());
	Ok(())
}
