//! Byte size parsing

// Imports
use crate::{Error, Result};

/// Parses a byte size, such as `512`, `4k` or `2G`.
///
/// A single trailing unit letter out of `b`, `k`, `m`, `g` and `t` (case insensitive)
/// multiplies the preceding integer by the matching power of 1024.
pub fn parse_bytes(token: &str) -> Result<u64> {
	let (digits, factor) = match token.chars().last().and_then(self::unit_factor) {
		Some(factor) => (&token[..token.len() - 1], factor),
		None => (token, 1),
	};

	let value = digits.parse::<u64>().map_err(|source| Error::SizeParse {
		token: token.to_owned(),
		source,
	})?;

	value
		.checked_mul(factor)
		.ok_or_else(|| Error::SizeOverflow { token: token.to_owned() })
}

/// Returns the byte factor of a unit letter
fn unit_factor(unit: char) -> Option<u64> {
	let exp = match unit.to_ascii_lowercase() {
		'b' => 0,
		'k' => 1,
		'm' => 2,
		'g' => 3,
		't' => 4,
		_ => return None,
	};

	Some(1024u64.pow(exp))
}

/// Extension trait to parse byte sizes from strings
#[extend::ext(name = ParseBytes)]
pub impl str {
	/// Parses this string as a byte size.
	///
	/// See [`parse_bytes`].
	fn parse_bytes(&self) -> Result<u64> {
		self::parse_bytes(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn plain_bytes() {
		assert_eq!(parse_bytes("512").unwrap(), 512);
		assert_eq!(parse_bytes("0").unwrap(), 0);
		assert_eq!(parse_bytes("7b").unwrap(), 7);
	}

	#[test]
	fn units() {
		assert_eq!(parse_bytes("2k").unwrap(), 2048);
		assert_eq!(parse_bytes("1m").unwrap(), 1024 * 1024);
		assert_eq!(parse_bytes("3G").unwrap(), 3 * 1024 * 1024 * 1024);
		assert_eq!(parse_bytes("1T").unwrap(), 1 << 40);
		assert_eq!("4K".parse_bytes().unwrap(), 4096);
	}

	#[test]
	fn bare_unit_is_an_error() {
		match parse_bytes("g") {
			Err(Error::SizeParse { token, .. }) => assert_eq!(token, "g"),
			res => panic!("Expected size parse error, found {res:?}"),
		}
	}

	#[test]
	fn rejects_malformed() {
		for token in ["", "1.5k", "-4", "2kb", "KB", "k2", "12x"] {
			assert!(
				matches!(parse_bytes(token), Err(Error::SizeParse { .. })),
				"{token:?} should be rejected"
			);
		}
	}

	#[test]
	fn rejects_overflow() {
		assert!(matches!(parse_bytes("17179869184g"), Err(Error::SizeOverflow { .. })));
	}
}
