use crate::UniStr;
use crate::UniString;
use crate::error::DecodeError;
use crate::width::Width;

/// UTF-8 width marker: 8-bit code units, one to four units per character.
///
/// This is a zero-sized type that implements [`Width`] by delegating to the
/// standard library's UTF-8 string functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Utf8;

impl Width for Utf8 {
    const NAME: &'static str = "UTF-8";
    const MAX_CHAR_UNITS: usize = 4;

    type Unit = u8;

    #[inline]
    fn validate(units: &[u8]) -> Result<(), DecodeError> {
        match core::str::from_utf8(units) {
            Ok(_) => Ok(()),
            Err(e) => Err(DecodeError::new(e.valid_up_to(), e.error_len())),
        }
    }

    #[inline]
    fn decode_char_at(units: &[u8], offset: usize) -> Option<(char, usize)> {
        if offset >= units.len() {
            return None;
        }

        let slice = &units[offset..];

        // The lead byte determines the sequence length
        let len = match slice[0] {
            0x00..=0x7F => 1,
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return None, // Invalid lead byte
        };

        if slice.len() < len {
            return None;
        }

        let s = core::str::from_utf8(&slice[..len]).ok()?;
        let c = s.chars().next()?;

        Some((c, offset + len))
    }

    fn decode_char_before(units: &[u8], offset: usize) -> Option<(char, usize)> {
        if offset == 0 || offset > units.len() {
            return None;
        }

        // UTF-8 is self-synchronizing, so we can scan backwards
        let mut start = offset - 1;
        while start > 0 && is_utf8_continuation(units[start]) {
            start -= 1;
        }

        let s = core::str::from_utf8(&units[start..offset]).ok()?;
        let c = s.chars().next()?;

        Some((c, start))
    }

    #[inline]
    fn encoded_len(c: char) -> usize {
        c.len_utf8()
    }

    #[inline]
    fn encode_char(c: char, buf: &mut [u8]) -> usize {
        c.encode_utf8(buf).len()
    }

    #[inline]
    fn is_char_boundary(units: &[u8], index: usize) -> bool {
        if index == 0 || index >= units.len() {
            return true;
        }
        // A char boundary is any byte that is NOT a continuation byte
        !is_utf8_continuation(units[index])
    }
}

/// Returns true if the byte is a UTF-8 continuation byte (10xxxxxx).
#[inline]
fn is_utf8_continuation(b: u8) -> bool {
    (b & 0xC0) == 0x80
}

// === Conversions from/to standard library str ===

impl From<String> for UniString<Utf8> {
    /// Creates a `UniString<Utf8>` from a `String` without copying.
    #[inline]
    fn from(s: String) -> Self {
        // SAFETY: String is always valid UTF-8
        unsafe { UniString::from_units_unchecked(s.into_bytes()) }
    }
}

impl From<UniString<Utf8>> for String {
    /// Converts a `UniString<Utf8>` to a `String` without copying.
    #[inline]
    fn from(s: UniString<Utf8>) -> String {
        // SAFETY: UniString<Utf8> is always valid UTF-8
        unsafe { String::from_utf8_unchecked(s.into_units()) }
    }
}

impl<'a> From<&'a UniStr<Utf8>> for &'a str {
    /// Converts a `&UniStr<Utf8>` to a `&str`.
    ///
    /// This is a zero-cost conversion since both are UTF-8.
    #[inline]
    fn from(s: &'a UniStr<Utf8>) -> &'a str {
        s.as_std()
    }
}

// === UniStr<Utf8> convenience methods ===

impl UniStr<Utf8> {
    /// Returns this string slice as a `&str`.
    ///
    /// This is a zero-cost conversion since both types are UTF-8.
    #[inline]
    pub fn as_std(&self) -> &str {
        // SAFETY: UniStr<Utf8> is always valid UTF-8
        unsafe { core::str::from_utf8_unchecked(self.as_units()) }
    }
}

impl AsRef<str> for UniStr<Utf8> {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_std()
    }
}

impl AsRef<str> for UniString<Utf8> {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_unistr().as_std()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Utf8::validate(b"hello").is_ok());
        assert!(Utf8::validate("héllo".as_bytes()).is_ok());
        assert!(Utf8::validate("日本語".as_bytes()).is_ok());
        assert!(Utf8::validate(&[0xFF]).is_err());
        assert!(Utf8::validate(&[0xC0]).is_err()); // Incomplete sequence
    }

    #[test]
    fn test_decode_char_at() {
        let bytes = "héllo".as_bytes();

        let (c, next) = Utf8::decode_char_at(bytes, 0).unwrap();
        assert_eq!(c, 'h');
        assert_eq!(next, 1);

        let (c, next) = Utf8::decode_char_at(bytes, 1).unwrap();
        assert_eq!(c, 'é');
        assert_eq!(next, 3);

        let (c, _) = Utf8::decode_char_at(bytes, 3).unwrap();
        assert_eq!(c, 'l');
    }

    #[test]
    fn test_decode_char_at_truncated() {
        // 'é' with its continuation byte cut off
        let bytes = &"é".as_bytes()[..1];
        assert!(Utf8::decode_char_at(bytes, 0).is_none());
    }

    #[test]
    fn test_decode_char_before() {
        let bytes = "héllo".as_bytes();

        let (c, start) = Utf8::decode_char_before(bytes, bytes.len()).unwrap();
        assert_eq!(c, 'o');
        assert_eq!(start, bytes.len() - 1);

        let (c, start) = Utf8::decode_char_before(bytes, 3).unwrap();
        assert_eq!(c, 'é');
        assert_eq!(start, 1);
    }

    #[test]
    fn test_is_char_boundary() {
        let bytes = "héllo".as_bytes();

        assert!(Utf8::is_char_boundary(bytes, 0));
        assert!(Utf8::is_char_boundary(bytes, 1));
        assert!(!Utf8::is_char_boundary(bytes, 2)); // Middle of 'é'
        assert!(Utf8::is_char_boundary(bytes, 3));
    }

    #[test]
    fn test_encode_char() {
        let mut buf = [0u8; 4];

        let len = Utf8::encode_char('h', &mut buf);
        assert_eq!(len, 1);
        assert_eq!(&buf[..len], b"h");

        let len = Utf8::encode_char('é', &mut buf);
        assert_eq!(len, 2);
        assert_eq!(&buf[..len], "é".as_bytes());

        let len = Utf8::encode_char('日', &mut buf);
        assert_eq!(len, 3);
        assert_eq!(&buf[..len], "日".as_bytes());
    }

    #[test]
    fn test_std_interop() {
        let s: UniString<Utf8> = UniString::from(String::from("héllo"));
        assert_eq!(s.as_unistr().as_std(), "héllo");

        let back: String = s.into();
        assert_eq!(back, "héllo");
    }
}
