use async_trait::async_trait;
use ethers::{
	middleware::SignerMiddleware,
	providers::{Http, Middleware, PendingTransaction, Provider},
	signers::{LocalWallet, Signer},
	types::{
		transaction::eip2718::TypedTransaction, Address, Bytes, TransactionRequest, H256, U256,
	},
};

use crate::config::Config;
use crate::error::{CliError, Result};

/// Everything the command handlers need from the node.
///
/// Addresses and hashes cross this boundary as strings so the connector
/// alone decides what counts as well-formed.
#[async_trait]
pub trait Chain: Send + Sync {
	/// Address of the configured wallet.  Fails without touching the
	/// network when no signing key is available.
	fn signer_address(&self) -> Result<Address>;

	async fn balance(&self, address: Address) -> Result<U256>;

	/// Sign and broadcast a plain value transfer, returning its hash
	/// as soon as the node accepts it.
	async fn send_value(&self, to: &str, value: U256) -> Result<String>;

	/// Execute a read-only `eth_call` and return the raw output.
	async fn call(&self, to: &str, data: Bytes) -> Result<Bytes>;

	/// Sign and broadcast a contract transaction, returning its hash.
	async fn send_call(&self, to: &str, data: Bytes) -> Result<String>;

	/// Wait until the transaction is mined.  Returns the block number
	/// when the node reports it.
	async fn wait_for_confirmation(&self, tx_hash: &str) -> Result<Option<u64>>;
}

/// `Chain` backed by an ethers HTTP provider and a local wallet.
///
/// Nothing is validated at construction: the provider and wallet are
/// built on first use so a bad URL or key only fails the command that
/// needs it.
pub struct EthersChain {
	rpc_url: String,
	private_key: Option<String>,
}

type SigningClient = SignerMiddleware<Provider<Http>, LocalWallet>;

impl EthersChain {
	pub fn new(config: &Config) -> Self {
		Self {
			rpc_url: config.rpc_url.clone(),
			private_key: config.private_key.clone(),
		}
	}

	fn provider(&self) -> Result<Provider<Http>> {
		Provider::<Http>::try_from(self.rpc_url.as_str())
			.map_err(|e| CliError::Config(format!("invalid RPC URL {}: {e}", self.rpc_url)))
	}

	fn wallet(&self) -> Result<LocalWallet> {
		let key = self.private_key.as_deref().ok_or_else(missing_key)?;
		key.strip_prefix("0x")
			.unwrap_or(key)
			.parse::<LocalWallet>()
			.map_err(|e| CliError::Config(format!("invalid PRIVATE_KEY: {e}")))
	}

	/// Signing client with the wallet's chain id taken from the node.
	async fn signing_client(&self) -> Result<SigningClient> {
		let wallet = self.wallet()?;
		let provider = self.provider()?;
		SignerMiddleware::new_with_provider_chain(provider, wallet)
			.await
			.map_err(CliError::network)
	}
}

#[async_trait]
impl Chain for EthersChain {
	fn signer_address(&self) -> Result<Address> {
		Ok(self.wallet()?.address())
	}

	async fn balance(&self, address: Address) -> Result<U256> {
		self.provider()?
			.get_balance(address, None)
			.await
			.map_err(CliError::network)
	}

	async fn send_value(&self, to: &str, value: U256) -> Result<String> {
		let to = parse_address(to)?;
		let client = self.signing_client().await?;
		let tx = TransactionRequest::new().to(to).value(value);
		let pending = client
			.send_transaction(tx, None)
			.await
			.map_err(CliError::network)?;
		Ok(format!("{:#x}", pending.tx_hash()))
	}

	async fn call(&self, to: &str, data: Bytes) -> Result<Bytes> {
		let mut tx = TransactionRequest::new().to(parse_address(to)?).data(data);
		// Bind to the wallet when one is usable so `msg.sender` is meaningful.
		if let Ok(from) = self.signer_address() {
			tx = tx.from(from);
		}
		let tx: TypedTransaction = tx.into();
		self.provider()?
			.call(&tx, None)
			.await
			.map_err(CliError::network)
	}

	async fn send_call(&self, to: &str, data: Bytes) -> Result<String> {
		let to = parse_address(to)?;
		let client = self.signing_client().await?;
		let tx = TransactionRequest::new().to(to).data(data);
		let pending = client
			.send_transaction(tx, None)
			.await
			.map_err(CliError::network)?;
		Ok(format!("{:#x}", pending.tx_hash()))
	}

	async fn wait_for_confirmation(&self, tx_hash: &str) -> Result<Option<u64>> {
		let hash = parse_h256(tx_hash)?;
		let provider = self.provider()?;
		let receipt = PendingTransaction::new(hash, &provider)
			.await
			.map_err(CliError::network)?
			.ok_or_else(|| {
				CliError::Network(format!("transaction {tx_hash} was dropped from the mempool"))
			})?;

		if receipt.status.map(|s| s.as_u64()) == Some(0) {
			return Err(CliError::Network(format!("transaction {tx_hash} reverted")));
		}
		Ok(receipt.block_number.map(|n| n.as_u64()))
	}
}

fn missing_key() -> CliError {
	CliError::Config("Private key not found! Please set PRIVATE_KEY in .env.".into())
}

fn parse_address(s: &str) -> Result<Address> {
	s.parse()
		.map_err(|e| CliError::Validation(format!("invalid address {s}: {e}")))
}

fn parse_h256(s: &str) -> Result<H256> {
	s.strip_prefix("0x")
		.unwrap_or(s)
		.parse()
		.map_err(|e| CliError::Validation(format!("invalid 256-bit hash: {e}")))
}
