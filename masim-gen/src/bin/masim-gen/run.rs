//! Output writing and `masim` invocation

// Imports
use {
	crate::args::Output,
	anyhow::Context,
	masim_gen::Config,
	std::{
		fs,
		io::{self, Write},
		path::Path,
		process::Command,
	},
};

/// Writes `config` to the output and runs `masim` on it, if requested
pub fn emit(config: &Config, output: &Output) -> Result<(), anyhow::Error> {
	// Note: The config is fully built by now, so nothing is written on failure.
	let text = config.to_masim_string();
	match &output.file {
		Some(path) => {
			fs::write(path, &text).with_context(|| format!("Unable to write config to {path:?}"))?;
			tracing::info!(?path, "Wrote config");
		},
		None => io::stdout()
			.lock()
			.write_all(text.as_bytes())
			.context("Unable to write config to stdout")?,
	}

	if let Some(masim) = &output.masim {
		let config_path = output.file.as_deref().context("`masim` requires an output file")?;
		self::run_masim(masim, config_path, output.log_interval_ms, &output.masim_args)?;
	}

	Ok(())
}

/// Runs `masim` on `config_path`, waiting for it to finish
fn run_masim(masim: &Path, config_path: &Path, log_interval_ms: Option<u64>, extra_args: &[String]) -> Result<(), anyhow::Error> {
	let mut cmd = Command::new(masim);
	if let Some(log_interval_ms) = log_interval_ms {
		cmd.arg(format!("--log_interval={log_interval_ms}"));
	}
	cmd.args(extra_args).arg(config_path);

	tracing::info!(?cmd, "Running masim");
	let status = cmd.status().with_context(|| format!("Unable to run {masim:?}"))?;
	anyhow::ensure!(status.success(), "`masim` exited with {status}");

	Ok(())
}
