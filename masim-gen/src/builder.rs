//! Direct config builder
//!
//! Builds a config from explicit region, phase and access pattern records, as
//! given on the command line or in a JSON spec file.

// Imports
use {
	crate::{
		config::{parse_int, parse_randomness},
		format::NO_DATA_FILE,
		size::parse_bytes,
		AccessPattern,
		Config,
		Error,
		Phase,
		Region,
		Result,
		RwMode,
	},
	std::{
		collections::{HashMap, HashSet},
		path::PathBuf,
	},
};

/// Region record
#[derive(PartialEq, Eq, Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RegionSpec {
	pub name:           String,
	pub sz_bytes:       u64,
	#[serde(default)]
	pub init_data_file: Option<PathBuf>,
}

impl RegionSpec {
	/// Parses a region record from its `<name> <size> <data file>` arguments.
	///
	/// The size accepts unit suffixes (see [`parse_bytes`]) and a data file of
	/// `none` means no data file.
	pub fn from_args(name: &str, sz_bytes: &str, init_data_file: &str) -> Result<Self> {
		Ok(Self {
			name:           name.to_owned(),
			sz_bytes:       parse_bytes(sz_bytes)?,
			init_data_file: (init_data_file != NO_DATA_FILE).then(|| PathBuf::from(init_data_file)),
		})
	}
}

/// Phase record
#[derive(PartialEq, Eq, Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PhaseSpec {
	pub name:       String,
	pub runtime_ms: u64,
}

impl PhaseSpec {
	/// Parses a phase record from its `<name> <runtime ms>` arguments
	pub fn from_args(name: &str, runtime_ms: &str) -> Result<Self> {
		Ok(Self {
			name:       name.to_owned(),
			runtime_ms: parse_int("phase runtime", runtime_ms)?,
		})
	}
}

/// Access pattern record
#[derive(PartialEq, Eq, Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PatternSpec {
	pub phase:       String,
	pub region:      String,
	pub random:      bool,
	pub stride:      u64,
	pub probability: u64,
	pub rw_mode:     RwMode,
}

impl PatternSpec {
	/// Parses an access pattern record from its
	/// `<phase> <region> <randomness> <stride> <probability> <rw mode>` arguments
	pub fn from_args(
		phase: &str,
		region: &str,
		random: &str,
		stride: &str,
		probability: &str,
		rw_mode: &str,
	) -> Result<Self> {
		Ok(Self {
			phase:       phase.to_owned(),
			region:      region.to_owned(),
			random:      parse_randomness(random)?,
			stride:      parse_int("stride", stride)?,
			probability: parse_int("access probability", probability)?,
			rw_mode:     rw_mode.parse()?,
		})
	}
}

/// All records of a config
#[derive(PartialEq, Eq, Clone, Default, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ConfigSpec {
	#[serde(default)]
	pub regions:         Vec<RegionSpec>,
	#[serde(default)]
	pub phases:          Vec<PhaseSpec>,
	#[serde(default)]
	pub access_patterns: Vec<PatternSpec>,
}

impl ConfigSpec {
	/// Builds the config.
	///
	/// # Errors
	/// Returns an error if any group of records is empty, if an access pattern
	/// refers to an undeclared phase, or if a declared phase has no access patterns.
	pub fn build(&self) -> Result<Config> {
		for (group, is_empty) in [
			("regions", self.regions.is_empty()),
			("phases", self.phases.is_empty()),
			("access patterns", self.access_patterns.is_empty()),
		] {
			if is_empty {
				return Err(Error::IncompleteConfiguration { group });
			}
		}

		let regions = self
			.regions
			.iter()
			.map(|region| Region::new(&region.name, region.sz_bytes, region.init_data_file.clone()))
			.collect::<Result<Vec<_>>>()?;

		// Group the patterns by phase first, then resolve each declared phase.
		let declared_phases = self.phases.iter().map(|phase| phase.name.as_str()).collect::<HashSet<_>>();
		let mut phase_patterns = HashMap::<&str, Vec<AccessPattern>>::new();
		for pattern in &self.access_patterns {
			if !declared_phases.contains(pattern.phase.as_str()) {
				return Err(Error::UnknownPhaseReference {
					phase: pattern.phase.clone(),
				});
			}

			phase_patterns
				.entry(pattern.phase.as_str())
				.or_default()
				.push(AccessPattern::new(
					&pattern.region,
					pattern.random,
					pattern.stride,
					pattern.probability,
					pattern.rw_mode,
				));
		}

		let phases = self
			.phases
			.iter()
			.map(|phase| {
				let patterns = phase_patterns
					.get(phase.name.as_str())
					.ok_or_else(|| Error::PhaseWithoutPatterns {
						phase: phase.name.clone(),
					})?;
				Phase::new(&phase.name, phase.runtime_ms, patterns.clone())
			})
			.collect::<Result<Vec<_>>>()?;

		let config = Config::new(regions, phases);
		if let Err(err) = config.check_references() {
			tracing::warn!(%err, "Config has dangling region references");
		}
		tracing::debug!(
			regions = config.regions().len(),
			phases = config.phases().len(),
			patterns = self.access_patterns.len(),
			"Built config"
		);

		Ok(config)
	}
}
