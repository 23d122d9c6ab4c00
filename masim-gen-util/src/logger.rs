//! Logger
//!
//! Logs to `stderr`, filtered by `RUST_LOG` (defaults to `info`), and optionally
//! to a file, filtered by `RUST_LOG_FILE` (defaults to `trace`).

// Imports
use {
	itertools::Itertools,
	std::{
		env,
		fs,
		io,
		path::Path,
		sync::{Mutex, PoisonError},
	},
	tracing::level_filters::LevelFilter,
	tracing_subscriber::{fmt, prelude::*, EnvFilter},
};

/// Default `stderr` filter
const DEFAULT_STDERR_FILTER: &str = "info";

/// Default log file filter
const DEFAULT_FILE_FILTER: &str = "trace";

/// Initializes the global logger.
///
/// Any messages queued with [`pre_init`] are emitted right after.
///
/// # Panics
/// Panics if a global logger was already set.
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	let stderr_layer = fmt::layer()
		.with_writer(io::stderr)
		.with_filter(self::env_filter("RUST_LOG", DEFAULT_STDERR_FILTER));

	// Note: We can't log yet, so any errors opening the file are queued instead.
	let file_layer = log_file.and_then(|path| {
		let file = fs::OpenOptions::new()
			.create(true)
			.write(true)
			.append(log_file_append)
			.truncate(!log_file_append)
			.open(path);
		match file {
			Ok(file) => Some(
				fmt::layer()
					.with_ansi(false)
					.with_writer(Mutex::new(file))
					.with_filter(self::env_filter("RUST_LOG_FILE", DEFAULT_FILE_FILTER)),
			),
			Err(err) => {
				pre_init::warn(format!("Unable to open log file {path:?}: {err}"));
				None
			},
		}
	});

	tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();

	for (level, msg) in pre_init::take() {
		match level {
			pre_init::Level::Debug => tracing::debug!("{msg}"),
			pre_init::Level::Warn => tracing::warn!("{msg}"),
		}
	}
}

/// Creates an env filter from `var`, falling back to `default`
fn env_filter(var: &str, default: &str) -> EnvFilter {
	match env::var(var) {
		Ok(directives) => EnvFilter::builder()
			.with_default_directive(LevelFilter::OFF.into())
			.parse_lossy(directives),
		Err(_) => EnvFilter::new(default),
	}
}

/// Messages logged before the logger is initialized
pub mod pre_init {
	// Imports
	use super::*;

	/// Pre-init message level
	#[derive(PartialEq, Eq, Clone, Copy, Debug)]
	pub enum Level {
		Debug,
		Warn,
	}

	/// Queued messages
	static MESSAGES: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

	/// Queues a debug message
	pub fn debug(msg: impl Into<String>) {
		self::push(Level::Debug, msg.into());
	}

	/// Queues a warning
	pub fn warn(msg: impl Into<String>) {
		self::push(Level::Warn, msg.into());
	}

	fn push(level: Level, msg: String) {
		MESSAGES.lock().unwrap_or_else(PoisonError::into_inner).push((level, msg));
	}

	/// Takes all queued messages, in the order they were queued
	pub(super) fn take() -> Vec<(Level, String)> {
		let mut messages = MESSAGES.lock().unwrap_or_else(PoisonError::into_inner);
		messages.drain(..).collect_vec()
	}
}
