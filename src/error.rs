use core::fmt;

use crate::width::Width;

/// An error indicating that a unit slice is not well-formed for a given width.
///
/// Matches the shape of `std::str::Utf8Error`, with all positions measured in
/// code units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    valid_up_to: usize,
    error_len: Option<usize>,
}

impl DecodeError {
    /// Creates a new decode error.
    #[inline]
    pub const fn new(valid_up_to: usize, error_len: Option<usize>) -> Self {
        Self {
            valid_up_to,
            error_len,
        }
    }

    /// Returns the index in the given slice up to which well-formed data was
    /// verified.
    ///
    /// It is the maximum index such that `units[..index]` is well-formed.
    #[inline]
    pub const fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// Provides more information about the failure:
    ///
    /// * `None`: the end of the input was reached unexpectedly.
    /// * `Some(len)`: an unexpected unit was encountered. The length
    ///   indicates how many units starting at the index given by
    ///   `valid_up_to()` are invalid.
    #[inline]
    pub const fn error_len(&self) -> Option<usize> {
        self.error_len
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error_len) = self.error_len {
            write!(
                f,
                "invalid sequence of {} code units from index {}",
                error_len, self.valid_up_to
            )
        } else {
            write!(
                f,
                "incomplete code unit sequence from index {}",
                self.valid_up_to
            )
        }
    }
}

impl core::error::Error for DecodeError {}

/// An error returned when conversion from a unit vector to a `UniString<W>`
/// fails.
///
/// Matches the shape of `std::string::FromUtf8Error`: the rejected buffer is
/// retained and can be recovered.
pub struct FromUnitsError<W: Width> {
    units: Vec<W::Unit>,
    error: DecodeError,
}

impl<W: Width> FromUnitsError<W> {
    /// Creates a new `FromUnitsError`.
    #[inline]
    pub(crate) fn new(units: Vec<W::Unit>, error: DecodeError) -> Self {
        Self { units, error }
    }

    /// Returns a slice of the units that were attempted to be converted.
    #[inline]
    pub fn as_units(&self) -> &[W::Unit] {
        &self.units
    }

    /// Consumes this error, returning the units that were attempted to be
    /// converted.
    #[inline]
    pub fn into_units(self) -> Vec<W::Unit> {
        self.units
    }

    /// Returns the decode error that caused the conversion to fail.
    #[inline]
    pub fn decode_error(&self) -> &DecodeError {
        &self.error
    }
}

impl<W: Width> fmt::Debug for FromUnitsError<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromUnitsError")
            .field("units", &self.units)
            .field("error", &self.error)
            .finish()
    }
}

impl<W: Width> fmt::Display for FromUnitsError<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<W: Width> core::error::Error for FromUnitsError<W> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<W: Width> Clone for FromUnitsError<W> {
    fn clone(&self) -> Self {
        Self {
            units: self.units.clone(),
            error: self.error.clone(),
        }
    }
}

impl<W: Width> PartialEq for FromUnitsError<W> {
    fn eq(&self, other: &Self) -> bool {
        self.units == other.units && self.error == other.error
    }
}

impl<W: Width> Eq for FromUnitsError<W> {}

/// An error returned when a format template cannot be resolved against its
/// argument list.
///
/// Formatting fails as a whole: the target string is never extended with
/// partial output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The text between a `{` and its matching `}` is not a base-10
    /// non-negative integer.
    InvalidIndex {
        /// The unit offset of the opening brace in the template.
        offset: usize,
    },
    /// A placeholder index is not covered by the supplied argument list.
    IndexOutOfRange {
        /// The parsed argument index.
        index: usize,
        /// The number of arguments that were supplied.
        len: usize,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex { offset } => {
                write!(
                    f,
                    "placeholder at unit offset {} is not a base-10 argument index",
                    offset
                )
            }
            Self::IndexOutOfRange { index, len } => {
                write!(
                    f,
                    "argument index {} out of range ({} argument{} supplied)",
                    index,
                    len,
                    if *len == 1 { "" } else { "s" }
                )
            }
        }
    }
}

impl core::error::Error for FormatError {}
