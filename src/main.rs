use clap::Parser;
use colored::Colorize;

use evm_cli::cli::Cli;
use evm_cli::commands::{self, Context};
use evm_cli::config::Config;
use evm_cli::error::CliError;

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	let cli = Cli::parse();

	if let Err(e) = run(&cli).await {
		eprintln!("{}", format!("{} error: {e}", e.kind()).red());
		std::process::exit(1);
	}
}

async fn run(cli: &Cli) -> Result<(), CliError> {
	let config = Config::load()
		.map_err(|e| CliError::Config(format!("could not load configuration: {e:#}")))?
		.with_overrides(cli.rpc_url.as_deref(), cli.root.as_deref());
	log::debug!("rpc: {}, root: {}", config.rpc_url, config.root.display());

	let ctx = Context::from_config(config);
	commands::dispatch(&ctx, &cli.command).await
}
