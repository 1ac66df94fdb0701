use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use colored::Colorize;
use tokio::io::AsyncWriteExt;

/// Append-only record of every transaction this CLI sends.
///
/// Writing the log is best effort: by the time a line is recorded the
/// on-chain effect has already happened, so a failed write is reported
/// and then ignored.
pub struct TxLog {
	path: PathBuf,
}

impl TxLog {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Append `[<timestamp>] <message>` as a single line.
	pub async fn record(&self, message: &str) {
		let line = format_line(Utc::now(), message);
		if let Err(e) = self.append(&line).await {
			log::error!("failed to write {}: {e}", self.path.display());
			eprintln!("{}", format!("Error logging transaction: {e}").red());
		}
	}

	async fn append(&self, line: &str) -> std::io::Result<()> {
		let mut file = tokio::fs::OpenOptions::new()
			.create(true)
			.append(true)
			.open(&self.path)
			.await?;
		file.write_all(line.as_bytes()).await?;
		file.flush().await
	}
}

/// Render one log line, e.g. `[2024-01-01T00:00:00.000Z] Sent 1 ETH ...`.
pub fn format_line(at: DateTime<Utc>, message: &str) -> String {
	format!("[{}] {message}\n", at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Render an argument list the way log lines expect it.
pub fn args_or_none(args: &[String]) -> String {
	if args.is_empty() {
		"none".to_owned()
	} else {
		args.join(",")
	}
}
