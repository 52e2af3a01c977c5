//! Width-parametric Unicode strings.
//!
//! This crate provides [`UniString<W>`] and its borrowed counterpart
//! [`UniStr<W>`], string types generic over the width of their code units:
//! [`Utf8`] (8-bit), [`Utf16`] (16-bit), and [`Utf32`] (32-bit). A string of
//! any width is always well-formed, and all positions in the API are
//! measured in code units of that width.
//!
//! Strings of different widths are interchangeable by content: equality,
//! ordering, and hashing project both sides to their Unicode scalar
//! sequences, and [`transcode`] converts losslessly between widths.
//!
//! ```
//! use unistring::{UniString, Utf8, Utf16};
//!
//! let a: UniString<Utf8> = UniString::from("héllo");
//! let b: UniString<Utf16> = a.to_utf16();
//!
//! assert_eq!(a, b);
//! assert_eq!(a.len(), 6); // bytes
//! assert_eq!(b.len(), 5); // 16-bit units
//! ```
//!
//! Beyond the usual string operations, the types carry Unicode canonical
//! composition ([`UniStr::normalized`], [`UniString::normalize`]) and a
//! positional `{index}` formatter ([`UniString::append_format`]).

#![deny(missing_docs)]

mod error;
mod format;
mod iter;
mod str;
mod string;
pub mod transcode;
mod utf8;
mod utf16;
mod utf32;
mod width;

pub use crate::error::{DecodeError, FormatError, FromUnitsError};
pub use crate::iter::{CharIndices, Chars, Drain, Split};
pub use crate::str::UniStr;
pub use crate::string::UniString;
pub use crate::transcode::Decoded;
pub use crate::utf8::Utf8;
pub use crate::utf16::Utf16;
pub use crate::utf32::Utf32;
pub use crate::width::{CodeUnit, Width};

/// A borrowed UTF-8 string slice.
pub type Utf8Str = UniStr<Utf8>;
/// A borrowed UTF-16 string slice.
pub type Utf16Str = UniStr<Utf16>;
/// A borrowed UTF-32 string slice.
pub type Utf32Str = UniStr<Utf32>;

/// An owned UTF-8 string.
pub type Utf8String = UniString<Utf8>;
/// An owned UTF-16 string.
pub type Utf16String = UniString<Utf16>;
/// An owned UTF-32 string.
pub type Utf32String = UniString<Utf32>;

/// Implements `From` conversions between each ordered pair of widths.
macro_rules! impl_width_from {
    ($($from:ident => $to:ident),* $(,)?) => {
        $(
            impl From<&UniStr<$from>> for UniString<$to> {
                fn from(s: &UniStr<$from>) -> Self {
                    // SAFETY: transcoding well-formed input yields
                    // well-formed output
                    unsafe {
                        Self::from_units_unchecked(
                            transcode::convert::<$from, $to>(s.as_units()),
                        )
                    }
                }
            }

            impl From<UniString<$from>> for UniString<$to> {
                fn from(s: UniString<$from>) -> Self {
                    Self::from(s.as_unistr())
                }
            }
        )*
    };
}

impl_width_from! {
    Utf8 => Utf16,
    Utf8 => Utf32,
    Utf16 => Utf8,
    Utf16 => Utf32,
    Utf32 => Utf8,
    Utf32 => Utf16,
}
