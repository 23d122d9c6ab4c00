//! Tiered memory test config generation
//!
//! Generates configs with equally sized regions and equally long phases, where each
//! phase accesses every region with a different hotness. The hotness of the regions
//! is a random permutation of `0..nr_regions`, shuffled anew for each phase.

// Imports
use {
	crate::{AccessPattern, Config, Error, Phase, Region, Result, RwMode},
	itertools::Itertools,
	rand::{seq::SliceRandom, Rng},
};

/// Stride of every tiering access pattern, in bytes
pub const TIERING_STRIDE: u64 = 4096;

/// Tiering test parameters
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct TieringParams {
	/// Total memory size, in bytes
	pub memsize: u64,

	/// Number of regions having different hotness
	pub nr_regions: usize,

	/// Number of phases
	pub nr_phases: usize,

	/// Runtime of each phase, in milliseconds
	pub phase_runtime_ms: u64,
}

impl TieringParams {
	/// Generates the config, shuffling hotness with `rng`.
	///
	/// Each region gets `memsize / nr_regions` bytes, rounded down.
	///
	/// # Errors
	/// Returns an error if there are no regions or phases, or if a region or phase
	/// would be empty.
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Config> {
		if self.nr_regions == 0 {
			return Err(Error::IncompleteConfiguration { group: "regions" });
		}
		if self.nr_phases == 0 {
			return Err(Error::IncompleteConfiguration { group: "phases" });
		}

		let region_size = self.memsize / self.nr_regions as u64;
		let regions = (0..self.nr_regions)
			.map(|region_idx| Region::new(format!("r{region_idx}"), region_size, None))
			.collect::<Result<Vec<_>>>()?;

		let phases = (0..self.nr_phases)
			.map(|phase_idx| {
				let mut hotness = (0..self.nr_regions as u64).collect_vec();
				hotness.shuffle(rng);
				tracing::trace!(phase_idx, ?hotness, "Shuffled region hotness");

				let patterns = regions
					.iter()
					.zip(hotness)
					.map(|(region, probability)| {
						AccessPattern::new(region.name(), true, TIERING_STRIDE, probability, RwMode::WriteOnly)
					})
					.collect();
				Phase::new(format!("p{phase_idx}"), self.phase_runtime_ms, patterns)
			})
			.collect::<Result<Vec<_>>>()?;

		tracing::debug!(params = ?self, region_size, "Generated tiering config");

		Ok(Config::new(regions, phases))
	}
}
