//! Arguments

// Imports
use {
	masim_gen::{RwMode, TimeUnit, ZeroPolicy},
	std::path::PathBuf,
};

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Sub-command
	#[command(subcommand)]
	pub sub_cmd: SubCmd,
}

/// Sub-command
#[derive(Debug, clap::Subcommand)]
pub enum SubCmd {
	#[clap(name = "direct")]
	Direct(Direct),

	#[clap(name = "grid")]
	Grid(Grid),

	#[clap(name = "tiering")]
	Tiering(Tiering),

	#[clap(name = "show")]
	Show(Show),
}

/// Builds a config from explicit regions, phases and access patterns
#[derive(Debug, clap::Args)]
pub struct Direct {
	/// Memory region
	#[clap(long = "region", num_args = 3, value_names = ["NAME", "SZ_BYTES", "INIT_DATA_FILE"])]
	pub regions: Vec<String>,

	/// Execution phase
	#[clap(long = "phase", num_args = 2, value_names = ["NAME", "RUNTIME_MS"])]
	pub phases: Vec<String>,

	/// Per-phase per-region access pattern
	#[clap(
		long = "access-pattern",
		num_args = 6,
		value_names = ["PHASE", "REGION", "RANDOMNESS", "STRIDE", "ACCESS_PROBABILITY", "RW_MODE"]
	)]
	pub access_patterns: Vec<String>,

	/// JSON file with `regions`, `phases` and `access_patterns`, instead of the above
	#[clap(long = "spec", conflicts_with_all = ["regions", "phases", "access_patterns"])]
	pub spec_file: Option<PathBuf>,

	/// Output
	#[clap(flatten)]
	pub output: Output,
}

/// Converts a hotness grid to a config
///
/// Each grid column becomes a region and each row becomes a phase.
#[derive(Debug, clap::Args)]
pub struct Grid {
	/// Grid, or a file containing it
	pub grid: String,

	/// Total memory size of the access pattern (width)
	pub space: String,

	/// Total time of the accesses (height)
	pub time: u64,

	/// What to do with `0` cells
	#[clap(long = "zero-policy", value_enum, default_value_t = ZeroPolicy::Skip)]
	pub zero_policy: ZeroPolicy,

	/// Unit of `time`
	#[clap(long = "time-unit", value_enum, default_value_t = TimeUnit::Seconds)]
	pub time_unit: TimeUnit,

	/// Read / write mode of all accesses
	#[clap(long = "rw-mode", value_enum, default_value_t = RwMode::WriteOnly)]
	pub rw_mode: RwMode,

	/// Output
	#[clap(flatten)]
	pub output: Output,
}

/// Generates a config for tiered memory performance testing
///
/// All regions have the same size and all phases the same runtime. Each
/// phase accesses every region with a different, random, hotness.
#[derive(Debug, clap::Args)]
pub struct Tiering {
	/// Total size of memory to stress
	#[clap(long = "memsize")]
	pub memsize: String,

	/// Number of regions having different hotness
	#[clap(long = "nr-regions")]
	pub nr_regions: usize,

	/// Number of phases
	#[clap(long = "nr-phases")]
	pub nr_phases: usize,

	/// Runtime of each phase, in milliseconds
	#[clap(long = "phase-runtime-ms")]
	pub phase_runtime_ms: u64,

	/// Seed for the hotness shuffles
	#[clap(long = "seed")]
	pub seed: Option<u64>,

	/// Output
	#[clap(flatten)]
	pub output: Output,
}

/// Reads a config and prints its contents
#[derive(Debug, clap::Args)]
pub struct Show {
	/// Config file
	pub config_file: PathBuf,

	/// Read / write mode of access patterns that don't specify one
	#[clap(long = "default-rw-mode", value_enum, default_value_t = RwMode::WriteOnly)]
	pub default_rw_mode: RwMode,

	/// Print as json
	#[clap(long = "json")]
	pub json: bool,
}

/// Output
#[derive(Debug, clap::Args)]
pub struct Output {
	/// Output file
	///
	/// Prints to stdout if not given
	#[clap(short = 'o', long = "output", group = "output-file")]
	pub file: Option<PathBuf>,

	/// `masim` executable to run on the output file
	#[clap(long = "masim", requires = "output-file")]
	pub masim: Option<PathBuf>,

	/// Access speed logging interval for `masim`, in milliseconds
	#[clap(long = "log-interval", requires = "masim")]
	pub log_interval_ms: Option<u64>,

	/// Extra argument for `masim`
	#[clap(long = "masim-arg", requires = "masim", allow_hyphen_values = true)]
	pub masim_args: Vec<String>,
}
