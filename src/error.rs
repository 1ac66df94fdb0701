use std::fmt;

use thiserror::Error;

/// A single constructor or function input as declared in an ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
	pub name: String,
	pub kind: String,
}

impl fmt::Display for ParamSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<{}:{}>", self.name, self.kind)
	}
}

/// Every way a command can fail.  The variant decides the prefix shown
/// to the operator, so tests can assert on the kind of failure.
#[derive(Debug, Error)]
pub enum CliError {
	#[error("{0}")]
	Config(String),

	#[error("{0}")]
	Network(String),

	#[error("{0}")]
	Validation(String),

	#[error(
		"Contract requires constructor arguments. Use: --constructor-args {}",
		usage(.0)
	)]
	MissingConstructorArgs(Vec<ParamSpec>),

	#[error("{0}")]
	Artifact(String),

	#[error("{0}")]
	Subprocess(String),
}

impl CliError {
	/// Short classification label printed before the message.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Config(_) => "config",
			Self::Network(_) => "network",
			Self::Validation(_) | Self::MissingConstructorArgs(_) => "validation",
			Self::Artifact(_) => "artifact",
			Self::Subprocess(_) => "subprocess",
		}
	}

	pub fn network(err: impl fmt::Display) -> Self {
		Self::Network(err.to_string())
	}
}

fn usage(params: &[ParamSpec]) -> String {
	params
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(" ")
}

pub type Result<T> = std::result::Result<T, CliError>;
