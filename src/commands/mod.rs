pub mod balance;
pub mod call;
pub mod deploy;
pub mod send;

use crate::chain::{Chain, EthersChain};
use crate::cli::Command;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::forge::{BuildTool, Forge};
use crate::tx_log::TxLog;

/// Everything a handler may touch, built once at startup and passed
/// down by reference.
pub struct Context {
	pub config: Config,
	pub chain: Box<dyn Chain>,
	pub build_tool: Box<dyn BuildTool>,
	pub tx_log: TxLog,
}

impl Context {
	pub fn new(config: Config, chain: Box<dyn Chain>, build_tool: Box<dyn BuildTool>) -> Self {
		let tx_log = TxLog::new(config.log_path());
		Self { config, chain, build_tool, tx_log }
	}

	/// Wire up the real node connection and the real forge binary.
	pub fn from_config(config: Config) -> Self {
		let chain = Box::new(EthersChain::new(&config));
		let forge = Box::new(Forge::new(config.forge_bin.clone()));
		Self::new(config, chain, forge)
	}

	/// The configured signing key, or a config error before anything
	/// external is attempted.
	pub fn require_private_key(&self) -> Result<&str> {
		self.config.private_key.as_deref().ok_or_else(|| {
			CliError::Config("Private key not found! Please set PRIVATE_KEY in .env.".into())
		})
	}
}

/// Run exactly one command.
pub async fn dispatch(ctx: &Context, command: &Command) -> Result<()> {
	match command {
		Command::Balance => balance::run(ctx).await,
		Command::Send { to, amount } => send::run(ctx, to, amount).await,
		Command::Deploy {
			contract_path,
			contract_name,
			constructor_args,
		} => {
			deploy::run(
				ctx,
				contract_path,
				contract_name,
				constructor_args.as_deref().unwrap_or_default(),
			)
			.await
		}
		Command::Call {
			contract_address,
			function_name,
			args,
			abi,
		} => call::run(ctx, contract_address, function_name, args, abi.as_deref()).await,
	}
}
