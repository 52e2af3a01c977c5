use crate::error::DecodeError;
use crate::width::Width;

/// UTF-32 width marker: 32-bit code units, exactly one unit per character.
///
/// Each unit holds a Unicode scalar value directly, so decoding is an
/// identity mapping plus a range check: surrogate values and values above
/// U+10FFFF are malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Utf32;

impl Width for Utf32 {
    const NAME: &'static str = "UTF-32";
    const MAX_CHAR_UNITS: usize = 1;

    type Unit = u32;

    fn validate(units: &[u32]) -> Result<(), DecodeError> {
        for (offset, &unit) in units.iter().enumerate() {
            if char::from_u32(unit).is_none() {
                return Err(DecodeError::new(offset, Some(1)));
            }
        }
        Ok(())
    }

    #[inline]
    fn decode_char_at(units: &[u32], offset: usize) -> Option<(char, usize)> {
        if offset >= units.len() {
            return None;
        }
        let c = char::from_u32(units[offset])?;
        Some((c, offset + 1))
    }

    #[inline]
    fn decode_char_before(units: &[u32], offset: usize) -> Option<(char, usize)> {
        if offset == 0 || offset > units.len() {
            return None;
        }
        let c = char::from_u32(units[offset - 1])?;
        Some((c, offset - 1))
    }

    #[inline]
    fn encoded_len(_c: char) -> usize {
        1
    }

    #[inline]
    fn encode_char(c: char, buf: &mut [u32]) -> usize {
        buf[0] = c as u32;
        1
    }

    #[inline]
    fn is_char_boundary(units: &[u32], index: usize) -> bool {
        index <= units.len()
    }
}
