//! Pure conversion between code-unit widths and Unicode scalar sequences.
//!
//! Every conversion is the composition of two halves: [`decode`] turns a
//! unit slice into a sequence of scalar values, and [`encode`] turns scalar
//! values back into units of any width. [`convert`] composes them, giving
//! one authoritative path per ordered width pair. All functions are pure,
//! allocate fresh output, and never read past the end of their input.
//!
//! # Malformed input
//!
//! [`decode`] is lenient: it stops at the first unit that cannot be
//! consumed and returns the successfully converted prefix together with the
//! number of units read, so callers can tell a clean decode from a
//! truncated one. [`decode_strict`] fails instead, reporting where the
//! input went wrong.
//!
//! # Example
//!
//! ```
//! use unistring::transcode;
//! use unistring::{Utf8, Utf16};
//!
//! let utf16: Vec<u16> = "héllo".encode_utf16().collect();
//! let utf8 = transcode::convert::<Utf16, Utf8>(&utf16);
//! assert_eq!(utf8, "héllo".as_bytes());
//! ```

use crate::error::DecodeError;
use crate::width::{CodeUnit, Width};

/// The result of a lenient decode: the converted prefix and how much of the
/// input produced it.
///
/// `units_read == input.len()` means the whole input was well-formed;
/// anything less means decoding stopped at the first malformed unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The scalar values decoded from the well-formed prefix.
    pub scalars: Vec<char>,
    /// The number of input units consumed.
    pub units_read: usize,
}

impl Decoded {
    /// Consumes the result, returning just the decoded scalar values.
    #[inline]
    pub fn into_scalars(self) -> Vec<char> {
        self.scalars
    }
}

/// Decodes a unit slice into scalar values, stopping at the first unit that
/// cannot be consumed.
///
/// This is the lenient path: malformed input silently truncates the output
/// at the last well-formed character. Inspect
/// [`units_read`](Decoded::units_read) to detect truncation.
pub fn decode<W: Width>(units: &[W::Unit]) -> Decoded {
    let mut scalars = Vec::new();
    let mut offset = 0;

    while offset < units.len() {
        match W::decode_char_at(units, offset) {
            Some((c, next)) => {
                scalars.push(c);
                offset = next;
            }
            None => break,
        }
    }

    Decoded {
        scalars,
        units_read: offset,
    }
}

/// Decodes a unit slice into scalar values, failing on malformed input.
///
/// Returns a [`DecodeError`] locating the first malformed sequence; nothing
/// is returned for partially well-formed input.
pub fn decode_strict<W: Width>(units: &[W::Unit]) -> Result<Vec<char>, DecodeError> {
    W::validate(units)?;
    Ok(decode::<W>(units).scalars)
}

/// Encodes a sequence of scalar values into units of width `W`.
///
/// Scalar values are always encodable in every width, so this cannot fail.
pub fn encode<W: Width>(scalars: impl IntoIterator<Item = char>) -> Vec<W::Unit> {
    let mut out = Vec::new();
    let mut buf = [W::Unit::ZERO; 4];

    for c in scalars {
        let len = W::encode_char(c, &mut buf[..W::MAX_CHAR_UNITS]);
        out.extend_from_slice(&buf[..len]);
    }

    out
}

/// Converts a unit slice from width `F` to width `T`.
///
/// Composes [`decode`] and [`encode`], so malformed input follows the
/// lenient policy: the output holds the conversion of the well-formed
/// prefix only.
pub fn convert<F: Width, T: Width>(units: &[F::Unit]) -> Vec<T::Unit> {
    encode::<T>(decode::<F>(units).scalars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Utf8, Utf16, Utf32};

    #[test]
    fn test_decode_complete() {
        let decoded = decode::<Utf8>("héllo".as_bytes());
        assert_eq!(decoded.units_read, "héllo".len());
        assert_eq!(decoded.into_scalars(), vec!['h', 'é', 'l', 'l', 'o']);
    }

    #[test]
    fn test_decode_truncates_at_malformed() {
        // "he" followed by an invalid byte, then more valid data
        let units = [0x68, 0x65, 0xFF, 0x68];
        let decoded = decode::<Utf8>(&units);
        assert_eq!(decoded.scalars, vec!['h', 'e']);
        assert_eq!(decoded.units_read, 2);
    }

    #[test]
    fn test_decode_truncates_at_lone_surrogate() {
        let units = [0x0068, 0xDE00, 0x0069];
        let decoded = decode::<Utf16>(&units);
        assert_eq!(decoded.scalars, vec!['h']);
        assert_eq!(decoded.units_read, 1);
    }

    #[test]
    fn test_decode_truncates_at_premature_end() {
        // 'h' then a high surrogate with nothing after it
        let units = [0x0068, 0xD83D];
        let decoded = decode::<Utf16>(&units);
        assert_eq!(decoded.scalars, vec!['h']);
        assert_eq!(decoded.units_read, 1);
    }

    #[test]
    fn test_decode_strict() {
        assert_eq!(
            decode_strict::<Utf8>(b"hi").unwrap(),
            vec!['h', 'i']
        );

        let err = decode_strict::<Utf32>(&[0x68, 0xD800]).unwrap_err();
        assert_eq!(err.valid_up_to(), 1);
        assert_eq!(err.error_len(), Some(1));
    }

    #[test]
    fn test_encode_each_width() {
        let scalars = vec!['h', 'é', '😀'];
        assert_eq!(encode::<Utf8>(scalars.clone()), "hé😀".as_bytes());
        assert_eq!(
            encode::<Utf16>(scalars.clone()),
            "hé😀".encode_utf16().collect::<Vec<u16>>()
        );
        assert_eq!(encode::<Utf32>(scalars), vec![0x68, 0xE9, 0x1F600]);
    }

    #[test]
    fn test_scalar_roundtrip() {
        let scalars: Vec<char> = "héllo 世界 😀".chars().collect();

        assert_eq!(decode::<Utf8>(&encode::<Utf8>(scalars.clone())).scalars, scalars);
        assert_eq!(decode::<Utf16>(&encode::<Utf16>(scalars.clone())).scalars, scalars);
        assert_eq!(decode::<Utf32>(&encode::<Utf32>(scalars.clone())).scalars, scalars);
    }

    #[test]
    fn test_convert_roundtrip() {
        let utf8 = "héllo 世界 😀".as_bytes();

        let utf16 = convert::<Utf8, Utf16>(utf8);
        assert_eq!(convert::<Utf16, Utf8>(&utf16), utf8);

        let utf32 = convert::<Utf8, Utf32>(utf8);
        assert_eq!(convert::<Utf32, Utf8>(&utf32), utf8);

        let via16 = convert::<Utf32, Utf16>(&utf32);
        assert_eq!(via16, utf16);
    }

    #[test]
    fn test_convert_empty() {
        assert!(convert::<Utf8, Utf16>(&[]).is_empty());
        assert!(convert::<Utf32, Utf8>(&[]).is_empty());
    }
}
