//! `masim` config format reading
//!
//! Reads configs the way `masim` itself does: lines starting with `#` are dropped,
//! the first paragraph lists the regions and every following paragraph is a phase.

// Imports
use {
	crate::{
		config::{parse_int, parse_randomness},
		format::NO_DATA_FILE,
		AccessPattern,
		Config,
		Error,
		Phase,
		Region,
		Result,
		RwMode,
	},
	masim_gen_util::SplitFields,
	std::{path::PathBuf, str::FromStr},
};

/// A line of the config, with its 1-based line number
type Line<'a> = (usize, &'a str);

/// Parses a config.
///
/// Patterns without a read / write mode use `default_rw_mode`.
pub fn parse_config(text: &str, default_rw_mode: RwMode) -> Result<Config> {
	let lines = text
		.lines()
		.enumerate()
		.map(|(line_idx, line)| (line_idx + 1, line))
		.filter(|(_, line)| !line.starts_with('#'))
		.collect::<Vec<Line>>();

	// Split into paragraphs, remembering whether the regions were terminated
	let mut paragraphs = lines
		.split(|(_, line)| line.is_empty())
		.filter(|paragraph| !paragraph.is_empty());
	let regions_paragraph = paragraphs.next().ok_or(Error::MalformedConfig {
		line:   1,
		reason: "no regions".to_owned(),
	})?;
	let regions_end = regions_paragraph.last().map_or(0, |&(line_idx, _)| line_idx);
	if !lines.iter().any(|&(line_idx, line)| line_idx > regions_end && line.is_empty()) {
		return Err(Error::MalformedConfig {
			line:   regions_end,
			reason: "regions must be followed by a blank line".to_owned(),
		});
	}

	let regions = regions_paragraph
		.iter()
		.map(|&line| self::parse_region(line))
		.collect::<Result<Vec<_>>>()?;
	tracing::trace!(?regions, "Parsed regions");

	let phases = paragraphs
		.map(|paragraph| self::parse_phase(paragraph, default_rw_mode))
		.collect::<Result<Vec<_>>>()?;

	let config = Config::new(regions, phases);
	config.check_references()?;
	tracing::debug!(
		regions = config.regions().len(),
		phases = config.phases().len(),
		"Parsed config"
	);

	Ok(config)
}

impl FromStr for Config {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		self::parse_config(s, RwMode::default())
	}
}

/// Parses a region line
fn parse_region((line_idx, line): Line) -> Result<Region> {
	let (name, sz_bytes, data_file) = match *line.split_fields() {
		[name, sz_bytes] => (name, sz_bytes, None),
		[name, sz_bytes, data_file] => (name, sz_bytes, Some(data_file)),
		ref fields => {
			return Err(Error::MalformedConfig {
				line:   line_idx,
				reason: format!("region needs 2 or 3 fields, found {}", fields.len()),
			})
		},
	};

	let sz_bytes = parse_int("region size", sz_bytes)?;
	let data_file = data_file
		.filter(|&data_file| data_file != NO_DATA_FILE)
		.map(PathBuf::from);

	Region::new(name, sz_bytes, data_file)
}

/// Parses a phase paragraph
fn parse_phase(lines: &[Line], default_rw_mode: RwMode) -> Result<Phase> {
	let [(_, name), (_, runtime_ms), pattern_lines @ ..] = lines else {
		return Err(Error::MalformedConfig {
			line:   lines.first().map_or(0, |&(line_idx, _)| line_idx),
			reason: "phase needs a name and a runtime".to_owned(),
		});
	};
	if pattern_lines.is_empty() {
		return Err(Error::MalformedConfig {
			line:   lines[1].0,
			reason: format!("phase {name:?} has no access patterns"),
		});
	}

	let runtime_ms = parse_int("phase runtime", runtime_ms.trim())?;
	let patterns = pattern_lines
		.iter()
		.map(|&line| self::parse_pattern(line, default_rw_mode))
		.collect::<Result<Vec<_>>>()?;

	Phase::new(*name, runtime_ms, patterns)
}

/// Parses an access pattern line
fn parse_pattern((line_idx, line): Line, default_rw_mode: RwMode) -> Result<AccessPattern> {
	let (region_name, random, stride, probability, rw_mode) = match *line.split_fields() {
		[region_name, random, stride, probability] => (region_name, random, stride, probability, None),
		[region_name, random, stride, probability, rw_mode] => (region_name, random, stride, probability, Some(rw_mode)),
		ref fields => {
			return Err(Error::MalformedConfig {
				line:   line_idx,
				reason: format!("access pattern needs 4 or 5 fields, found {}", fields.len()),
			})
		},
	};

	let rw_mode = match rw_mode {
		Some(rw_mode) => rw_mode.parse()?,
		None => default_rw_mode,
	};

	Ok(AccessPattern::new(
		region_name,
		parse_randomness(random)?,
		parse_int("stride", stride)?,
		parse_int("access probability", probability)?,
		rw_mode,
	))
}
