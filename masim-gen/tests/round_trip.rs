//! Builds configs through every path, renders them and reads them back

// Imports
use {
	masim_gen::{
		builder::{ConfigSpec, PatternSpec, PhaseSpec, RegionSpec},
		parse::parse_config,
		Config,
		Error,
		Grid,
		GridOptions,
		RwMode,
		TieringParams,
	},
	rand::{rngs::StdRng, SeedableRng},
};

/// Renders `config` and parses it back, checking nothing changed
fn assert_round_trips(config: &Config) {
	let text = config.to_masim_string();
	let parsed = parse_config(&text, RwMode::ReadOnly).expect("Rendered config should parse");
	assert_eq!(&parsed, config);
	assert_eq!(parsed.to_masim_string(), text);
}

#[test]
fn direct_round_trip() {
	let spec = ConfigSpec {
		regions:         vec![
			RegionSpec::from_args("hot", "64m", "none").unwrap(),
			RegionSpec::from_args("cold", "1g", "/tmp/cold.dat").unwrap(),
		],
		phases:          vec![
			PhaseSpec::from_args("init", "500").unwrap(),
			PhaseSpec::from_args("run", "10000").unwrap(),
		],
		access_patterns: vec![
			PatternSpec::from_args("init", "cold", "0", "4096", "1", "wo").unwrap(),
			PatternSpec::from_args("run", "hot", "1", "64", "95", "rw").unwrap(),
			PatternSpec::from_args("run", "cold", "1", "64", "5", "ro").unwrap(),
		],
	};

	let config = spec.build().unwrap();
	assert_eq!(config.regions()[1].sz_bytes(), 1 << 30);
	assert_round_trips(&config);
}

#[test]
fn grid_round_trip() {
	let grid = Grid::parse("01100\n00100\n02100\n00100\n00109").unwrap();
	for options in [GridOptions::pixels(), GridOptions::ascii_art()] {
		let config = grid.to_config(10 << 20, 5, &options).unwrap();
		assert_eq!(config.regions().len(), grid.nr_cols());
		assert_eq!(config.phases().len(), grid.nr_rows());
		assert_round_trips(&config);
	}
}

#[test]
fn tiering_round_trip() {
	let params = TieringParams {
		memsize:          1 << 30,
		nr_regions:       8,
		nr_phases:        4,
		phase_runtime_ms: 1000,
	};
	let config = params.generate(&mut StdRng::seed_from_u64(7)).unwrap();
	assert_round_trips(&config);
}

#[test]
fn synthesis_errors_stop_early() {
	assert!(matches!(Grid::parse(""), Err(Error::EmptyGrid)));
	assert!(matches!(
		ConfigSpec::default().build(),
		Err(Error::IncompleteConfiguration { group: "regions" })
	));
}
