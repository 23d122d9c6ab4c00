//! Utilities

// Modules
pub mod logger;

// Imports
use std::{cell::RefCell, fmt};

/// Extension trait for splitting comma-separated protocol lines
#[extend::ext(name = SplitFields)]
pub impl str {
	/// Splits this line on `,`, trimming whitespace around each field.
	///
	/// An empty line yields a single empty field, the same as [`str::split`].
	fn split_fields(&self) -> Vec<&str> {
		self.split(',').map(str::trim).collect()
	}
}

/// [`fmt::Display`] helper to display using a `FnMut(&mut fmt::Formatter)`
pub struct DisplayWrapper<F: FnMut(&mut fmt::Formatter) -> fmt::Result>(RefCell<F>);

impl<F: FnMut(&mut fmt::Formatter) -> fmt::Result> DisplayWrapper<F> {
	/// Creates a new display wrapper
	#[must_use]
	pub const fn new(func: F) -> Self {
		Self(RefCell::new(func))
	}
}

impl<F: FnMut(&mut fmt::Formatter) -> fmt::Result> fmt::Display for DisplayWrapper<F> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		// Note: `f` cannot be re-entrant, so this cannot fail
		self.0.borrow_mut()(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn split_fields_trims() {
		assert_eq!("a, 4096 ,none".split_fields(), ["a", "4096", "none"]);
		assert_eq!("".split_fields(), [""]);
	}

	#[test]
	fn display_wrapper_calls_closure() {
		let value = 7;
		let s = DisplayWrapper::new(|f| write!(f, "value={value}")).to_string();
		assert_eq!(s, "value=7");
	}
}
