//! Code-unit width traits.
//!
//! This module provides the core traits that define the three storage widths
//! a string can be instantiated over:
//!
//! - [`CodeUnit`]: the fixed-width storage atom (`u8`, `u16`, or `u32`)
//! - [`Width`]: the per-width codec (validate, decode, encode, boundaries)
//!
//! # Example
//!
//! ```
//! use unistring::{Width, Utf8, Utf16};
//!
//! assert_eq!(Utf8::NAME, "UTF-8");
//! assert_eq!(Utf16::MAX_CHAR_UNITS, 2);
//!
//! // Validate unit slices
//! assert!(Utf8::validate(b"hello").is_ok());
//! assert!(Utf16::validate(&[0xD800]).is_err()); // lone surrogate
//!
//! // Encode a character
//! let mut buf = [0u16; 2];
//! let len = Utf16::encode_char('\u{1F600}', &mut buf);
//! assert_eq!(len, 2); // surrogate pair
//! ```

use core::fmt;
use core::hash::Hash;

use crate::error::DecodeError;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// A fixed-width code unit: the storage atom of one encoding form.
///
/// Implemented for `u8` (UTF-8), `u16` (UTF-16), and `u32` (UTF-32). This
/// trait is sealed; the set of unit widths is closed.
pub trait CodeUnit:
    sealed::Sealed + Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static
{
    /// The zero (null) unit, used as a terminator in raw-pointer construction.
    const ZERO: Self;

    /// Widens an ASCII byte into a unit. ASCII values are single units in
    /// every width, so this is always lossless.
    fn from_ascii(b: u8) -> Self;

    /// The numeric value of this unit.
    fn as_u32(self) -> u32;
}

impl CodeUnit for u8 {
    const ZERO: Self = 0;

    #[inline]
    fn from_ascii(b: u8) -> Self {
        b
    }

    #[inline]
    fn as_u32(self) -> u32 {
        self as u32
    }
}

impl CodeUnit for u16 {
    const ZERO: Self = 0;

    #[inline]
    fn from_ascii(b: u8) -> Self {
        b as u16
    }

    #[inline]
    fn as_u32(self) -> u32 {
        self as u32
    }
}

impl CodeUnit for u32 {
    const ZERO: Self = 0;

    #[inline]
    fn from_ascii(b: u8) -> Self {
        b as u32
    }

    #[inline]
    fn as_u32(self) -> u32 {
        self
    }
}

/// A trait defining one code-unit width and its encoding form.
///
/// Implementors are zero-sized types (ZSTs) that serve as type-level markers
/// for the width of a string. All codec operations are static methods over
/// slices of the associated [`CodeUnit`] type, and all offsets are measured
/// in units, not bytes.
pub trait Width: Sized + 'static {
    /// The human-readable name of this encoding form (e.g., "UTF-8").
    const NAME: &'static str;

    /// The maximum number of units a single character can occupy.
    const MAX_CHAR_UNITS: usize;

    /// The code-unit type backing this width.
    type Unit: CodeUnit;

    /// Validates that the given unit slice is a well-formed encoding of a
    /// sequence of Unicode scalar values.
    ///
    /// Returns `Ok(())` if the units are valid, or a [`DecodeError`]
    /// indicating where validation failed.
    fn validate(units: &[Self::Unit]) -> Result<(), DecodeError>;

    /// Decodes a character starting at the given unit offset.
    ///
    /// Returns `Some((char, next_offset))` where `next_offset` is the unit
    /// index immediately after the decoded character, or `None` if no valid
    /// character starts at `offset` (including when the input ends before
    /// the sequence is complete — no read past the end ever occurs).
    fn decode_char_at(units: &[Self::Unit], offset: usize) -> Option<(char, usize)>;

    /// Decodes the character ending just before the given unit offset.
    ///
    /// Returns `Some((char, start_offset))` where `start_offset` is the unit
    /// index where the character starts, or `None` if no valid character
    /// ends at `offset`.
    fn decode_char_before(units: &[Self::Unit], offset: usize) -> Option<(char, usize)>;

    /// Returns the number of units needed to encode the given character.
    fn encoded_len(c: char) -> usize;

    /// Encodes a character into the given buffer.
    ///
    /// Returns the number of units written.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is too small to hold the encoded character.
    fn encode_char(c: char, buf: &mut [Self::Unit]) -> usize;

    /// Checks if the given index is a valid character boundary in the unit
    /// slice. Index 0 and the slice length always are.
    fn is_char_boundary(units: &[Self::Unit], index: usize) -> bool;
}
