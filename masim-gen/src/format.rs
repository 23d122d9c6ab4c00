//! `masim` config format rendering
//!
//! ```text
//! <region>, <sz_bytes>, <init data file | none>
//! ...
//!
//! <phase>
//! <runtime_ms>
//! <region>, <randomness 0|1>, <stride>, <probability>, <rw_mode>
//! ...
//!
//! <phase>
//! ...
//! ```
//!
//! Every line, including the last one, is newline-terminated, and phases are
//! separated by a single blank line.

// Imports
use {
	crate::{AccessPattern, Config, Phase, Region},
	std::{fmt, io},
};

/// Data file token for regions without one
pub const NO_DATA_FILE: &str = "none";

impl Config {
	/// Renders this config in the `masim` format
	pub fn to_masim_string(&self) -> String {
		self.to_string()
	}

	/// Writes this config in the `masim` format to `writer`
	pub fn write_masim<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
		write!(writer, "{self}")
	}
}

impl fmt::Display for Config {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for region in self.regions() {
			writeln!(f, "{region}")?;
		}
		writeln!(f)?;

		for (phase_idx, phase) in self.phases().iter().enumerate() {
			if phase_idx != 0 {
				writeln!(f)?;
			}
			write!(f, "{phase}")?;
		}

		Ok(())
	}
}

impl fmt::Display for Region {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}, {}, ", self.name(), self.sz_bytes())?;
		match self.init_data_file() {
			Some(path) => write!(f, "{}", path.display()),
			None => f.write_str(NO_DATA_FILE),
		}
	}
}

/// Renders the whole phase block, newline-terminated
impl fmt::Display for Phase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "{}", self.name())?;
		writeln!(f, "{}", self.runtime_ms())?;
		for pattern in self.patterns() {
			writeln!(f, "{pattern}")?;
		}

		Ok(())
	}
}

impl fmt::Display for AccessPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}, {}, {}, {}, {}",
			self.region_name(),
			u8::from(self.random()),
			self.stride(),
			self.probability(),
			self.rw_mode()
		)
	}
}

#[cfg(test)]
mod tests {
	use {super::*, crate::RwMode, std::path::PathBuf};

	fn sample() -> Config {
		Config::new(
			vec![
				Region::new("a", 4096, None).unwrap(),
				Region::new("b", 8192, Some(PathBuf::from("data/b.bin"))).unwrap(),
			],
			vec![
				Phase::new("warmup", 1000, vec![
					AccessPattern::new("a", true, 4096, 1, RwMode::WriteOnly),
					AccessPattern::new("b", false, 64, 3, RwMode::ReadWrite),
				])
				.unwrap(),
				Phase::new("steady", 2500, vec![AccessPattern::new("b", false, 64, 9, RwMode::ReadOnly)]).unwrap(),
			],
		)
	}

	#[test]
	fn renders_protocol() {
		let expected = "a, 4096, none\n\
		                b, 8192, data/b.bin\n\
		                \n\
		                warmup\n\
		                1000\n\
		                a, 1, 4096, 1, wo\n\
		                b, 0, 64, 3, rw\n\
		                \n\
		                steady\n\
		                2500\n\
		                b, 0, 64, 9, ro\n";
		assert_eq!(sample().to_masim_string(), expected);
	}

	#[test]
	fn rendering_is_idempotent() {
		let config = sample();
		assert_eq!(config.to_masim_string(), config.to_masim_string());

		let mut bytes = vec![];
		config.write_masim(&mut bytes).unwrap();
		assert_eq!(bytes, config.to_masim_string().into_bytes());
	}

	#[test]
	fn dangling_region_is_rendered_verbatim() {
		let config = Config::new(vec![], vec![Phase::new("p", 1, vec![AccessPattern::new(
			"ghost",
			false,
			4096,
			0,
			RwMode::WriteOnly,
		)])
		.unwrap()]);
		assert_eq!(config.to_masim_string(), "\np\n1\nghost, 0, 4096, 0, wo\n");
	}

	#[test]
	fn structural_counts() {
		let config = sample();
		let text = config.to_masim_string();
		let lines = text.lines().collect::<Vec<_>>();

		let pattern_count = config.phases().iter().map(|phase| phase.patterns().len()).sum::<usize>();
		let blank_count = lines.iter().filter(|line| line.is_empty()).count();
		assert_eq!(blank_count, config.phases().len());
		assert_eq!(
			lines.len(),
			config.regions().len() + blank_count + 2 * config.phases().len() + pattern_count
		);
		assert!(lines[..config.regions().len()]
			.iter()
			.all(|line| line.split(", ").count() == 3));
	}
}
