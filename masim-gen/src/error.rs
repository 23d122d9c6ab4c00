//! Errors

// Imports
use std::num::ParseIntError;

/// Config synthesis error
///
/// Every variant aborts synthesis: there is no partially built config.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A size token's numeric prefix wasn't an integer
	#[error("Invalid size {token:?}")]
	SizeParse {
		token:  String,
		#[source]
		source: ParseIntError,
	},

	/// A size token didn't fit in 64 bits once its unit was applied
	#[error("Size {token:?} is too large")]
	SizeOverflow { token: String },

	/// A non-size integer field wasn't an integer
	#[error("Invalid {what} {value:?}")]
	InvalidNumber {
		what:   &'static str,
		value:  String,
		#[source]
		source: ParseIntError,
	},

	/// A value wasn't one of the accepted tokens
	#[error("Invalid {what} {value:?}, expected one of {expected:?}")]
	InvalidEnum {
		what:     &'static str,
		value:    String,
		expected: &'static [&'static str],
	},

	/// A value that must be positive was zero
	#[error("{what} of {name:?} must be positive")]
	NonPositive { what: &'static str, name: String },

	/// An access pattern named a phase that wasn't declared
	#[error("Access pattern references undeclared phase {phase:?}")]
	UnknownPhaseReference { phase: String },

	/// A declared phase had no access patterns
	#[error("Phase {phase:?} has no access patterns")]
	PhaseWithoutPatterns { phase: String },

	/// An access pattern named a region that wasn't declared
	#[error("Phase {phase:?} references undeclared region {region:?}")]
	UnknownRegionReference { phase: String, region: String },

	/// The grid had no rows, or its first row was empty
	#[error("Grid is empty")]
	EmptyGrid,

	/// A grid cell wasn't a decimal digit
	#[error("Invalid grid symbol {symbol:?} at row {row}, column {col}")]
	InvalidGridSymbol { row: usize, col: usize, symbol: char },

	/// A required group of entities wasn't supplied
	#[error("Config is not given: no {group} supplied")]
	IncompleteConfiguration { group: &'static str },

	/// Config text didn't follow the `masim` format
	#[error("Malformed config at line {line}: {reason}")]
	MalformedConfig { line: usize, reason: String },
}

/// Result alias
pub type Result<T, E = Error> = std::result::Result<T, E>;
