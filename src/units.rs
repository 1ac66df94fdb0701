use ethers::types::U256;
use ethers::utils::{format_units, parse_units};

use crate::error::{CliError, Result};

/// Decimal places of the native currency.
pub const ETHER_DECIMALS: usize = 18;

/// Convert a decimal amount such as `"0.5"` to wei.  Digits beyond the
/// 18th decimal place are dropped, never rounded.
pub fn parse_ether(amount: &str) -> Result<U256> {
	let invalid = || CliError::Validation(format!("invalid amount: {amount:?}"));

	let trimmed = amount.trim();
	let (int, frac) = match trimmed.split_once('.') {
		Some((int, frac)) => (int, frac),
		None => (trimmed, ""),
	};
	if int.is_empty() && frac.is_empty() {
		return Err(invalid());
	}
	if !int.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
		return Err(invalid());
	}

	let int = if int.is_empty() { "0" } else { int };
	let normalized = if frac.is_empty() {
		int.to_owned()
	} else {
		format!("{int}.{frac}")
	};
	let wei = parse_units(normalized, ETHER_DECIMALS as u32).map_err(|_| invalid())?;
	Ok(wei.into())
}

/// Render wei as a decimal ether string, e.g. `"1.0"` or `"0.000123"`.
pub fn format_ether(wei: U256) -> String {
	// Formatting a U256 with 18 decimals cannot overflow.
	let full = format_units(wei, ETHER_DECIMALS as u32).unwrap_or_else(|_| wei.to_string());
	match full.split_once('.') {
		Some((int, frac)) => {
			let frac = frac.trim_end_matches('0');
			if frac.is_empty() {
				format!("{int}.0")
			} else {
				format!("{int}.{frac}")
			}
		}
		None => format!("{full}.0"),
	}
}
