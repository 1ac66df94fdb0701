use ethers::abi::token::{LenientTokenizer, Tokenizer};
use ethers::abi::{Abi, Function, StateMutability, Token};
use ethers::types::{Bytes, I256};
use ethers::utils::to_checksum;

use crate::error::{CliError, Result};

/// A function resolved from an interface, with its encoded calldata.
#[derive(Debug)]
pub struct PreparedCall<'a> {
	pub function: &'a Function,
	pub calldata: Bytes,
}

impl PreparedCall<'_> {
	/// `view` and `pure` functions are answered by `eth_call`; anything
	/// else has to be sent as a transaction.
	pub fn is_read_only(&self) -> bool {
		matches!(
			self.function.state_mutability,
			StateMutability::View | StateMutability::Pure
		)
	}

	/// Decode the raw `eth_call` output and render it for the operator.
	pub fn format_output(&self, output: &[u8]) -> Result<String> {
		let tokens = self.function.decode_output(output).map_err(|e| {
			CliError::Validation(format!(
				"could not decode output of {}: {e}",
				self.function.name
			))
		})?;
		Ok(tokens.iter().map(format_token).collect::<Vec<_>>().join(","))
	}
}

/// Look up `name` among the interface's functions.  Overloads are told
/// apart by argument count only.
pub fn resolve_function<'a>(abi: &'a Abi, name: &str, arg_count: usize) -> Result<&'a Function> {
	let candidates = abi
		.functions_by_name(name)
		.map_err(|_| CliError::Validation(format!("function `{name}` not found in ABI")))?;

	candidates
		.iter()
		.find(|f| f.inputs.len() == arg_count)
		.ok_or_else(|| {
			let expected = candidates
				.iter()
				.map(|f| f.inputs.len().to_string())
				.collect::<Vec<_>>()
				.join(" or ");
			CliError::Validation(format!(
				"function `{name}` expects {expected} argument(s), got {arg_count}"
			))
		})
}

/// Resolve the function, tokenize `args` positionally against its
/// declared inputs and encode the calldata.
pub fn prepare_call<'a>(abi: &'a Abi, name: &str, args: &[String]) -> Result<PreparedCall<'a>> {
	let function = resolve_function(abi, name, args.len())?;

	let tokens = function
		.inputs
		.iter()
		.zip(args)
		.map(|(param, raw)| {
			LenientTokenizer::tokenize(&param.kind, raw).map_err(|e| {
				CliError::Validation(format!(
					"argument `{}` is not a valid {} for `{}`: {e}",
					raw, param.kind, param.name
				))
			})
		})
		.collect::<Result<Vec<Token>>>()?;

	let calldata = function
		.encode_input(&tokens)
		.map_err(|e| CliError::Validation(format!("could not encode call to {name}: {e}")))?;

	Ok(PreparedCall {
		function,
		calldata: calldata.into(),
	})
}

/// Human-readable rendering of a decoded value.
pub fn format_token(token: &Token) -> String {
	match token {
		Token::Address(a) => to_checksum(a, None),
		Token::FixedBytes(b) | Token::Bytes(b) => format!("0x{}", hex::encode(b)),
		Token::Int(v) => I256::from_raw(*v).to_string(),
		Token::Uint(v) => v.to_string(),
		Token::Bool(b) => b.to_string(),
		Token::String(s) => s.clone(),
		Token::FixedArray(items) | Token::Array(items) => {
			format!("[{}]", items.iter().map(format_token).collect::<Vec<_>>().join(","))
		}
		Token::Tuple(items) => {
			format!("({})", items.iter().map(format_token).collect::<Vec<_>>().join(","))
		}
	}
}
