//! Access pattern config generator for `masim` (`masim-gen`)

// Modules
mod args;
mod run;

// Imports
use {
	self::args::{Args, SubCmd},
	anyhow::Context,
	clap::Parser,
	itertools::Itertools,
	masim_gen::{
		builder::{ConfigSpec, PatternSpec, PhaseSpec, RegionSpec},
		parse,
		Config,
		Grid,
		GridOptions,
		ParseBytes,
		TieringParams,
	},
	masim_gen_util::logger,
	rand::{rngs::StdRng, SeedableRng},
	std::{
		fs,
		io::{self, Write},
		path::Path,
	},
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	match args.sub_cmd {
		SubCmd::Direct(cmd) => {
			let config = self::direct(&cmd).context("Unable to build config")?;
			run::emit(&config, &cmd.output)
		},
		SubCmd::Grid(cmd) => {
			let config = self::grid(&cmd).context("Unable to convert grid")?;
			run::emit(&config, &cmd.output)
		},
		SubCmd::Tiering(cmd) => {
			let config = self::tiering(&cmd).context("Unable to generate tiering config")?;
			run::emit(&config, &cmd.output)
		},
		SubCmd::Show(cmd) => self::show(&cmd),
	}
}

/// Builds a config from explicit records
fn direct(cmd: &args::Direct) -> Result<Config, anyhow::Error> {
	let spec = match &cmd.spec_file {
		Some(spec_file) => {
			let spec_file = fs::File::open(spec_file).context("Unable to open spec file")?;
			serde_json::from_reader::<_, ConfigSpec>(spec_file).context("Unable to parse spec file")?
		},
		None => ConfigSpec {
			regions:         cmd
				.regions
				.iter()
				.tuples()
				.map(|(name, sz_bytes, init_data_file)| RegionSpec::from_args(name, sz_bytes, init_data_file))
				.collect::<Result<_, _>>()?,
			phases:          cmd
				.phases
				.iter()
				.tuples()
				.map(|(name, runtime_ms)| PhaseSpec::from_args(name, runtime_ms))
				.collect::<Result<_, _>>()?,
			access_patterns: cmd
				.access_patterns
				.iter()
				.tuples()
				.map(|(phase, region, random, stride, probability, rw_mode)| {
					PatternSpec::from_args(phase, region, random, stride, probability, rw_mode)
				})
				.collect::<Result<_, _>>()?,
		},
	};
	tracing::trace!(?spec, "Config spec");

	spec.build().map_err(anyhow::Error::from)
}

/// Converts a grid to a config
fn grid(cmd: &args::Grid) -> Result<Config, anyhow::Error> {
	// Note: An existing file takes precedence over literal text
	let text = match Path::new(&cmd.grid).is_file() {
		true => fs::read_to_string(&cmd.grid).with_context(|| format!("Unable to read grid file {:?}", cmd.grid))?,
		false => cmd.grid.clone(),
	};
	let grid = Grid::parse(&text)?;

	let space = cmd.space.parse_bytes()?;
	let options = GridOptions {
		zero_policy: cmd.zero_policy,
		time_unit:   cmd.time_unit,
		rw_mode:     cmd.rw_mode,
	};

	grid.to_config(space, cmd.time, &options).map_err(anyhow::Error::from)
}

/// Generates a tiering test config
fn tiering(cmd: &args::Tiering) -> Result<Config, anyhow::Error> {
	let params = TieringParams {
		memsize:          cmd.memsize.parse_bytes()?,
		nr_regions:       cmd.nr_regions,
		nr_phases:        cmd.nr_phases,
		phase_runtime_ms: cmd.phase_runtime_ms,
	};

	let config = match cmd.seed {
		Some(seed) => params.generate(&mut StdRng::seed_from_u64(seed))?,
		None => params.generate(&mut rand::thread_rng())?,
	};

	Ok(config)
}

/// Prints a config
fn show(cmd: &args::Show) -> Result<(), anyhow::Error> {
	let text = fs::read_to_string(&cmd.config_file).context("Unable to read config file")?;
	let config = parse::parse_config(&text, cmd.default_rw_mode).context("Unable to parse config file")?;

	let mut stdout = io::stdout().lock();
	match cmd.json {
		true => {
			serde_json::to_writer_pretty(&mut stdout, &config).context("Unable to write config")?;
			writeln!(stdout).context("Unable to write config")?;
		},
		false => write!(stdout, "{}", config.summary()).context("Unable to write config")?,
	}

	Ok(())
}
