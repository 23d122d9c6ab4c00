//! Access pattern config generator for `masim` (`masim-gen`)
//!
//! Builds the regions / phases / access patterns model consumed by the `masim`
//! memory access simulator and renders it in its line-oriented config format.

// Modules
pub mod builder;
pub mod config;
pub mod error;
pub mod format;
pub mod grid;
pub mod parse;
pub mod size;
pub mod tiering;

// Exports
pub use self::{
	config::{AccessPattern, Config, Phase, Region, RwMode},
	error::{Error, Result},
	grid::{Grid, GridOptions, TimeUnit, ZeroPolicy},
	size::{parse_bytes, ParseBytes},
	tiering::TieringParams,
};
