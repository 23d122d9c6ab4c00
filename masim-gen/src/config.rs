//! Access pattern config model
//!
//! A config is an ordered list of [`Region`]s followed by an ordered list of [`Phase`]s.
//! Each phase owns the [`AccessPattern`]s run during it, which refer to regions by name.
//!
//! All entities are immutable once built, and the constructors that have an invariant
//! to uphold are fallible.

// Imports
use {
	crate::{Error, Result},
	masim_gen_util::DisplayWrapper,
	std::{
		fmt,
		path::{Path, PathBuf},
		str::FromStr,
	},
};

/// Memory region
#[derive(PartialEq, Eq, Clone, Debug)]
#[derive(serde::Serialize)]
pub struct Region {
	/// Name
	name: String,

	/// Size, in bytes
	sz_bytes: u64,

	/// File to load the initial contents from
	init_data_file: Option<PathBuf>,
}

impl Region {
	/// Creates a new region.
	///
	/// # Errors
	/// Returns an error if `sz_bytes` is 0.
	pub fn new(name: impl Into<String>, sz_bytes: u64, init_data_file: Option<PathBuf>) -> Result<Self> {
		let name = name.into();
		if sz_bytes == 0 {
			return Err(Error::NonPositive { what: "Size", name });
		}

		Ok(Self {
			name,
			sz_bytes,
			init_data_file,
		})
	}

	/// Returns the name of this region
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the size of this region, in bytes
	pub fn sz_bytes(&self) -> u64 {
		self.sz_bytes
	}

	/// Returns the initial data file of this region, if any
	pub fn init_data_file(&self) -> Option<&Path> {
		self.init_data_file.as_deref()
	}
}

/// Read / write mode of an access pattern
#[derive(PartialEq, Eq, Clone, Copy, Hash, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[derive(clap::ValueEnum)]
pub enum RwMode {
	/// Write only
	#[serde(rename = "wo")]
	#[value(name = "wo")]
	WriteOnly,

	/// Read only
	#[serde(rename = "ro")]
	#[value(name = "ro")]
	ReadOnly,

	/// Read and write
	#[serde(rename = "rw")]
	#[value(name = "rw")]
	ReadWrite,
}

impl RwMode {
	/// All accepted tokens
	pub const TOKENS: &'static [&'static str] = &["wo", "ro", "rw"];

	/// Returns the token of this mode
	pub fn as_str(self) -> &'static str {
		match self {
			Self::WriteOnly => "wo",
			Self::ReadOnly => "ro",
			Self::ReadWrite => "rw",
		}
	}
}

impl Default for RwMode {
	/// `masim`'s default, when a pattern doesn't specify one
	fn default() -> Self {
		Self::WriteOnly
	}
}

impl FromStr for RwMode {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"wo" => Ok(Self::WriteOnly),
			"ro" => Ok(Self::ReadOnly),
			"rw" => Ok(Self::ReadWrite),
			_ => Err(Error::InvalidEnum {
				what:     "rw mode",
				value:    s.to_owned(),
				expected: Self::TOKENS,
			}),
		}
	}
}

impl fmt::Display for RwMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Parses a randomness flag, which must be `0` or `1`
pub fn parse_randomness(s: &str) -> Result<bool> {
	let value = s.parse::<i64>().map_err(|source| Error::InvalidNumber {
		what: "randomness",
		value: s.to_owned(),
		source,
	})?;

	match value {
		0 => Ok(false),
		1 => Ok(true),
		_ => Err(Error::InvalidEnum {
			what:     "randomness",
			value:    s.to_owned(),
			expected: &["0", "1"],
		}),
	}
}

/// Parses a plain integer field, such as a stride or runtime
pub fn parse_int(what: &'static str, s: &str) -> Result<u64> {
	s.parse::<u64>().map_err(|source| Error::InvalidNumber {
		what,
		value: s.to_owned(),
		source,
	})
}

/// Access pattern of a single region during a phase
#[derive(PartialEq, Eq, Clone, Debug)]
#[derive(serde::Serialize)]
pub struct AccessPattern {
	/// Name of the accessed region
	region_name: String,

	/// Whether offsets are random, instead of strided
	random: bool,

	/// Stride between sequential accesses, in bytes
	stride: u64,

	/// Relative access weight within the phase
	probability: u64,

	/// Read / write mode
	rw_mode: RwMode,
}

impl AccessPattern {
	/// Creates a new access pattern
	pub fn new(region_name: impl Into<String>, random: bool, stride: u64, probability: u64, rw_mode: RwMode) -> Self {
		Self {
			region_name: region_name.into(),
			random,
			stride,
			probability,
			rw_mode,
		}
	}

	pub fn region_name(&self) -> &str {
		&self.region_name
	}

	pub fn random(&self) -> bool {
		self.random
	}

	pub fn stride(&self) -> u64 {
		self.stride
	}

	pub fn probability(&self) -> u64 {
		self.probability
	}

	pub fn rw_mode(&self) -> RwMode {
		self.rw_mode
	}
}

/// Execution phase
#[derive(PartialEq, Eq, Clone, Debug)]
#[derive(serde::Serialize)]
pub struct Phase {
	/// Name
	name: String,

	/// Runtime, in milliseconds
	runtime_ms: u64,

	/// Access patterns, in emission order
	patterns: Vec<AccessPattern>,
}

impl Phase {
	/// Creates a new phase.
	///
	/// # Errors
	/// Returns an error if `runtime_ms` is 0.
	pub fn new(name: impl Into<String>, runtime_ms: u64, patterns: Vec<AccessPattern>) -> Result<Self> {
		let name = name.into();
		if runtime_ms == 0 {
			return Err(Error::NonPositive { what: "Runtime", name });
		}

		Ok(Self {
			name,
			runtime_ms,
			patterns,
		})
	}

	/// Returns the name of this phase
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the runtime of this phase, in milliseconds
	pub fn runtime_ms(&self) -> u64 {
		self.runtime_ms
	}

	/// Returns all access patterns of this phase
	pub fn patterns(&self) -> &[AccessPattern] {
		&self.patterns
	}
}

/// Access pattern config
#[derive(PartialEq, Eq, Clone, Debug)]
#[derive(serde::Serialize)]
pub struct Config {
	/// Regions
	regions: Vec<Region>,

	/// Phases, in execution order
	phases: Vec<Phase>,
}

impl Config {
	/// Creates a config from its regions and phases.
	///
	/// Region references aren't checked here, see [`Config::check_references`].
	pub fn new(regions: Vec<Region>, phases: Vec<Phase>) -> Self {
		Self { regions, phases }
	}

	pub fn regions(&self) -> &[Region] {
		&self.regions
	}

	pub fn phases(&self) -> &[Phase] {
		&self.phases
	}

	/// Returns the region named `name`
	pub fn region(&self, name: &str) -> Option<&Region> {
		self.regions.iter().find(|region| region.name == name)
	}

	/// Checks that every access pattern refers to a declared region
	pub fn check_references(&self) -> Result<()> {
		for phase in &self.phases {
			if let Some(pattern) = phase.patterns.iter().find(|pattern| self.region(&pattern.region_name).is_none()) {
				return Err(Error::UnknownRegionReference {
					phase:  phase.name.clone(),
					region: pattern.region_name.clone(),
				});
			}
		}

		Ok(())
	}

	/// Returns a human readable summary of this config, as `masim --pr_config` prints it
	pub fn summary(&self) -> impl fmt::Display + '_ {
		DisplayWrapper::new(move |f| {
			writeln!(f, "memory regions")?;
			for region in &self.regions {
				writeln!(f, "\t{}: {} bytes", region.name, region.sz_bytes)?;
			}
			writeln!(f)?;

			for phase in &self.phases {
				writeln!(f, "Phase ({}) for {} ms", phase.name, phase.runtime_ms)?;
				for (pattern_idx, pattern) in phase.patterns.iter().enumerate() {
					writeln!(f, "\tPattern {pattern_idx}")?;
					writeln!(
						f,
						"\t\t{} access region {} with stride {} ({}, probability {})",
						match pattern.random {
							true => "randomly",
							false => "sequentially",
						},
						pattern.region_name,
						pattern.stride,
						pattern.rw_mode,
						pattern.probability,
					)?;
				}
			}

			Ok(())
		})
	}
}
