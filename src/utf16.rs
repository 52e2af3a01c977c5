use crate::error::DecodeError;
use crate::width::Width;

/// UTF-16 width marker: 16-bit code units, one or two units per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Utf16;

// Surrogate range constants
const SURROGATE_HIGH_START: u16 = 0xD800;
const SURROGATE_HIGH_END: u16 = 0xDBFF;
const SURROGATE_LOW_START: u16 = 0xDC00;
const SURROGATE_LOW_END: u16 = 0xDFFF;

#[inline]
fn is_high_surrogate(unit: u16) -> bool {
    (SURROGATE_HIGH_START..=SURROGATE_HIGH_END).contains(&unit)
}

#[inline]
fn is_low_surrogate(unit: u16) -> bool {
    (SURROGATE_LOW_START..=SURROGATE_LOW_END).contains(&unit)
}

/// Combines a surrogate pair into a supplementary-plane scalar value.
#[inline]
fn combine_surrogates(high: u16, low: u16) -> u32 {
    let high = (high - SURROGATE_HIGH_START) as u32;
    let low = (low - SURROGATE_LOW_START) as u32;
    0x10000 + (high << 10) + low
}

impl Width for Utf16 {
    const NAME: &'static str = "UTF-16";
    const MAX_CHAR_UNITS: usize = 2;

    type Unit = u16;

    fn validate(units: &[u16]) -> Result<(), DecodeError> {
        let mut offset = 0;
        while offset < units.len() {
            let unit = units[offset];

            if is_high_surrogate(unit) {
                // High surrogate - must be followed by a low surrogate
                if offset + 2 > units.len() {
                    return Err(DecodeError::new(offset, None));
                }
                if !is_low_surrogate(units[offset + 1]) {
                    return Err(DecodeError::new(offset, Some(1)));
                }
                offset += 2;
            } else if is_low_surrogate(unit) {
                // Lone low surrogate is invalid
                return Err(DecodeError::new(offset, Some(1)));
            } else {
                // BMP character
                offset += 1;
            }
        }

        Ok(())
    }

    fn decode_char_at(units: &[u16], offset: usize) -> Option<(char, usize)> {
        if offset >= units.len() {
            return None;
        }

        let unit = units[offset];

        if is_high_surrogate(unit) {
            // Surrogate pair
            if offset + 2 > units.len() {
                return None;
            }
            let low = units[offset + 1];
            if !is_low_surrogate(low) {
                return None;
            }

            let c = char::from_u32(combine_surrogates(unit, low))?;
            Some((c, offset + 2))
        } else if is_low_surrogate(unit) {
            // Lone low surrogate
            None
        } else {
            // BMP character
            let c = char::from_u32(unit as u32)?;
            Some((c, offset + 1))
        }
    }

    fn decode_char_before(units: &[u16], offset: usize) -> Option<(char, usize)> {
        if offset == 0 || offset > units.len() {
            return None;
        }

        let prev = units[offset - 1];

        if is_low_surrogate(prev) {
            // Low surrogate: the high half must precede it
            if offset < 2 {
                return None;
            }
            let high = units[offset - 2];
            if !is_high_surrogate(high) {
                return None;
            }

            let c = char::from_u32(combine_surrogates(high, prev))?;
            Some((c, offset - 2))
        } else if is_high_surrogate(prev) {
            // Lone high surrogate
            None
        } else {
            // BMP character
            let c = char::from_u32(prev as u32)?;
            Some((c, offset - 1))
        }
    }

    #[inline]
    fn encoded_len(c: char) -> usize {
        c.len_utf16()
    }

    #[inline]
    fn encode_char(c: char, buf: &mut [u16]) -> usize {
        c.encode_utf16(buf).len()
    }

    fn is_char_boundary(units: &[u16], index: usize) -> bool {
        if index == 0 || index >= units.len() {
            return true;
        }
        // A low surrogate means we are in the middle of a pair
        !is_low_surrogate(units[index])
    }
}
