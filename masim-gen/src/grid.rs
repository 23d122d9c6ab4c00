//! Grid to config mapping
//!
//! A grid is a matrix of hotness digits, such as
//!
//! ```text
//! 01100
//! 00100
//! 02100
//! ```
//!
//! Each column becomes a region and each row becomes a phase, with every cell
//! giving the relative access frequency of its region during its phase. Rendering
//! the resulting access heatmap should give back the grid.

// Imports
use {
	crate::{AccessPattern, Config, Error, Phase, Region, Result, RwMode},
	itertools::Itertools,
};

/// Stride of every grid access pattern, in bytes
pub const GRID_STRIDE: u64 = 4096;

/// What to do with `0` cells
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(clap::ValueEnum)]
pub enum ZeroPolicy {
	/// Emit an access pattern with probability 0
	Include,

	/// Emit no access pattern
	Skip,
}

/// Unit of the total time budget
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(clap::ValueEnum)]
pub enum TimeUnit {
	/// Seconds, converted to milliseconds for the phases
	#[value(name = "s")]
	Seconds,

	/// Milliseconds
	#[value(name = "ms")]
	Millis,
}

/// Grid mapping options
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct GridOptions {
	pub zero_policy: ZeroPolicy,
	pub time_unit:   TimeUnit,
	pub rw_mode:     RwMode,
}

impl GridOptions {
	/// Ascii art mapping: every cell is emitted
	pub fn ascii_art() -> Self {
		Self {
			zero_policy: ZeroPolicy::Include,
			time_unit:   TimeUnit::Seconds,
			rw_mode:     RwMode::WriteOnly,
		}
	}

	/// Pixel mapping: `0` cells are left out
	pub fn pixels() -> Self {
		Self {
			zero_policy: ZeroPolicy::Skip,
			..Self::ascii_art()
		}
	}
}

/// Hotness grid
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Grid {
	/// Rows of cell values, all digits
	rows: Vec<Vec<u8>>,
}

impl Grid {
	/// Parses a grid from text, one row per line.
	///
	/// Surrounding whitespace is ignored.
	pub fn parse(text: &str) -> Result<Self> {
		Self::from_rows(text.trim().lines())
	}

	/// Creates a grid from its rows.
	///
	/// # Errors
	/// Returns an error if there are no rows, the first row is empty, or any cell
	/// isn't a decimal digit.
	pub fn from_rows<I, S>(rows: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let rows = rows
			.into_iter()
			.enumerate()
			.map(|(row_idx, row)| {
				row.as_ref()
					.chars()
					.enumerate()
					.map(|(col_idx, symbol)| match symbol.to_digit(10) {
						Some(value) => Ok(value as u8),
						None => Err(Error::InvalidGridSymbol {
							row: row_idx,
							col: col_idx,
							symbol,
						}),
					})
					.collect::<Result<Vec<_>>>()
			})
			.collect::<Result<Vec<_>>>()?;

		match rows.first() {
			Some(first) if !first.is_empty() => (),
			_ => return Err(Error::EmptyGrid),
		}

		if !rows.iter().map(Vec::len).all_equal() {
			tracing::warn!("Grid rows have different lengths, only the first row decides the regions");
		}

		Ok(Self { rows })
	}

	/// Returns the number of rows (phases)
	pub fn nr_rows(&self) -> usize {
		self.rows.len()
	}

	/// Returns the number of columns (regions)
	pub fn nr_cols(&self) -> usize {
		self.rows[0].len()
	}

	/// Maps this grid to a config spanning `space` bytes and `time` units of time.
	///
	/// Every region gets an equal share of `space` and every phase an equal share of
	/// `time`, truncated to whole bytes / milliseconds. The remainders are dropped.
	///
	/// # Errors
	/// Returns an error if a share truncates to 0.
	pub fn to_config(&self, space: u64, time: u64, options: &GridOptions) -> Result<Config> {
		let region_size = (space as f64 / self.nr_cols() as f64) as u64;
		let regions = (0..self.nr_cols())
			.map(|col_idx| Region::new(self::region_name(col_idx), region_size, None))
			.collect::<Result<Vec<_>>>()?;

		let phase_time = time as f64 / self.nr_rows() as f64;
		let runtime_ms = match options.time_unit {
			TimeUnit::Seconds => (phase_time * 1000.0) as u64,
			TimeUnit::Millis => phase_time as u64,
		};

		let phases = self
			.rows
			.iter()
			.enumerate()
			.map(|(row_idx, row)| {
				let patterns = row
					.iter()
					.enumerate()
					.filter(|&(_, &value)| value != 0 || options.zero_policy == ZeroPolicy::Include)
					.map(|(col_idx, &value)| {
						AccessPattern::new(
							self::region_name(col_idx),
							false,
							GRID_STRIDE,
							u64::from(value),
							options.rw_mode,
						)
					})
					.collect_vec();
				if patterns.is_empty() {
					tracing::warn!(row_idx, "Grid row has no accesses, `masim` won't accept its phase");
				}

				Phase::new(format!("row {row_idx}"), runtime_ms, patterns)
			})
			.collect::<Result<Vec<_>>>()?;

		tracing::debug!(
			nr_cols = self.nr_cols(),
			nr_rows = self.nr_rows(),
			region_size,
			runtime_ms,
			"Mapped grid"
		);

		Ok(Config::new(regions, phases))
	}
}

/// Returns the name of the region for column `col_idx`
fn region_name(col_idx: usize) -> String {
	format!("region{col_idx}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pixels_example() {
		let grid = Grid::from_rows(["01", "10"]).unwrap();
		let config = grid.to_config(100, 2, &GridOptions::pixels()).unwrap();

		assert_eq!(config.regions().len(), 2);
		assert!(config.regions().iter().all(|region| region.sz_bytes() == 50));

		let phases = config.phases();
		assert_eq!(phases.len(), 2);
		assert!(phases.iter().all(|phase| phase.runtime_ms() == 1000));
		assert_eq!(phases[0].patterns(), [AccessPattern::new(
			"region1",
			false,
			4096,
			1,
			RwMode::WriteOnly
		)]);
		assert_eq!(phases[1].patterns(), [AccessPattern::new(
			"region0",
			false,
			4096,
			1,
			RwMode::WriteOnly
		)]);

		assert_eq!(
			config.to_masim_string(),
			"region0, 50, none\nregion1, 50, none\n\nrow 0\n1000\nregion1, 0, 4096, 1, wo\n\nrow 1\n1000\nregion0, \
			 0, 4096, 1, wo\n"
		);
	}

	#[test]
	fn pattern_counts_follow_policy() {
		let grid = Grid::parse("\n01100\n00100\n02100\n00000\n00109\n").unwrap();
		assert_eq!(grid.nr_rows(), 5);
		assert_eq!(grid.nr_cols(), 5);

		let skipped = grid.to_config(5 << 20, 10, &GridOptions::pixels()).unwrap();
		let counts = skipped.phases().iter().map(|phase| phase.patterns().len()).collect_vec();
		assert_eq!(counts, [2, 1, 2, 0, 2]);

		let included = grid.to_config(5 << 20, 10, &GridOptions::ascii_art()).unwrap();
		assert_eq!(included.regions().len(), 5);
		assert!(included.phases().iter().all(|phase| phase.patterns().len() == 5));
		assert_eq!(included.phases()[4].patterns()[4].probability(), 9);
		assert_eq!(included.phases()[4].patterns()[0].probability(), 0);
	}

	#[test]
	fn truncates_shares() {
		let grid = Grid::parse("111\n111\n111").unwrap();
		let config = grid.to_config(100, 1, &GridOptions::ascii_art()).unwrap();
		assert_eq!(config.regions()[2].sz_bytes(), 33);
		assert_eq!(config.phases()[0].runtime_ms(), 333);

		let options = GridOptions {
			time_unit: TimeUnit::Millis,
			rw_mode: RwMode::ReadWrite,
			..GridOptions::pixels()
		};
		let config = grid.to_config(100, 1000, &options).unwrap();
		assert_eq!(config.phases()[0].runtime_ms(), 333);
		assert_eq!(config.phases()[0].patterns()[0].rw_mode(), RwMode::ReadWrite);
	}

	#[test]
	fn zero_shares_are_errors() {
		let grid = Grid::parse("11\n11").unwrap();
		assert!(matches!(
			grid.to_config(1, 10, &GridOptions::pixels()),
			Err(Error::NonPositive { what: "Size", .. })
		));
		assert!(matches!(
			grid.to_config(4096, 1, &GridOptions {
				time_unit: TimeUnit::Millis,
				..GridOptions::pixels()
			}),
			Err(Error::NonPositive { what: "Runtime", .. })
		));
	}

	#[test]
	fn empty_grid() {
		assert!(matches!(Grid::parse(""), Err(Error::EmptyGrid)));
		assert!(matches!(Grid::parse(" \n\t\n"), Err(Error::EmptyGrid)));
		assert!(matches!(Grid::from_rows(Vec::<String>::new()), Err(Error::EmptyGrid)));
		assert!(matches!(Grid::from_rows(["", "11"]), Err(Error::EmptyGrid)));
	}

	#[test]
	fn invalid_symbol() {
		match Grid::parse("01\n0x") {
			Err(Error::InvalidGridSymbol { row, col, symbol }) => assert_eq!((row, col, symbol), (1, 1, 'x')),
			res => panic!("Expected invalid symbol, found {res:?}"),
		}
	}

	#[test]
	fn crlf_rows() {
		let grid = Grid::parse("12\r\n34\r\n").unwrap();
		assert_eq!((grid.nr_rows(), grid.nr_cols()), (2, 2));
	}
}
