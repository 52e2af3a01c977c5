use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::{Index, Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use unicode_normalization::UnicodeNormalization;

use crate::UniString;
use crate::error::DecodeError;
use crate::iter::{CharIndices, Chars, Split};
use crate::transcode;
use crate::width::Width;
use crate::{Utf8, Utf16, Utf32};

/// A borrowed string slice of width `W`.
///
/// This is the borrowed counterpart to [`UniString<W>`], analogous to how
/// `str` relates to `String`. All positions are measured in code units of
/// the width's [`Unit`](Width::Unit) type.
///
/// Equality, ordering, and hashing are defined over the canonical UTF-32
/// scalar projection, so strings of different widths compare by content:
///
/// ```
/// use unistring::{UniString, Utf8, Utf16};
///
/// let a: UniString<Utf8> = UniString::from("héllo");
/// let b: UniString<Utf16> = UniString::from("héllo");
/// assert!(a == b);
/// ```
#[repr(transparent)]
pub struct UniStr<W: Width> {
    _marker: PhantomData<W>,
    units: [W::Unit],
}

impl<W: Width> UniStr<W> {
    // === Construction ===

    /// Converts a unit slice to a string slice.
    ///
    /// Returns an error if the units are not well-formed for this width.
    #[inline]
    pub fn from_units(units: &[W::Unit]) -> Result<&Self, DecodeError> {
        W::validate(units)?;
        Ok(unsafe { Self::from_units_unchecked(units) })
    }

    /// Converts a unit slice to a string slice without checking validity.
    ///
    /// # Safety
    ///
    /// The units must be well-formed for width `W`.
    #[inline]
    pub unsafe fn from_units_unchecked(units: &[W::Unit]) -> &Self {
        // SAFETY: caller guarantees the units are well-formed;
        // UniStr is a transparent wrapper around [W::Unit]
        unsafe { &*(units as *const [W::Unit] as *const Self) }
    }

    // === Length ===

    /// Returns the length of `self` in code units.
    #[inline]
    pub const fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if `self` has a length of zero units.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    // === Unit access ===

    /// Returns the underlying code units.
    #[inline]
    pub const fn as_units(&self) -> &[W::Unit] {
        &self.units
    }

    /// Returns a raw pointer to the first code unit.
    #[inline]
    pub const fn as_ptr(&self) -> *const W::Unit {
        self.units.as_ptr()
    }

    // === Boundaries and slicing ===

    /// Checks that the `index`-th unit is the first unit of an encoded
    /// character or the end of the string.
    #[inline]
    pub fn is_char_boundary(&self, index: usize) -> bool {
        W::is_char_boundary(&self.units, index)
    }

    /// Returns the subslice over the given unit range, or `None` if the
    /// range is out of bounds or either end is not a character boundary.
    pub fn get(&self, range: Range<usize>) -> Option<&Self> {
        let Range { start, end } = range;
        if start > end || end > self.len() {
            return None;
        }
        if !self.is_char_boundary(start) || !self.is_char_boundary(end) {
            return None;
        }
        // SAFETY: both ends are character boundaries
        Some(unsafe { Self::from_units_unchecked(&self.units[start..end]) })
    }

    /// Copies the subrange starting at unit offset `start`, spanning `count`
    /// units (or to the end of the string if `count` is `None`), into a new
    /// owned string.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or either end is not a
    /// character boundary.
    pub fn substr(&self, start: usize, count: Option<usize>) -> UniString<W> {
        let end = match count {
            Some(n) => start + n,
            None => self.len(),
        };
        self[start..end].to_unistring()
    }

    // === Iteration ===

    /// Returns an iterator over the `char`s of this string slice.
    #[inline]
    pub fn chars(&self) -> Chars<'_, W> {
        Chars::new(self)
    }

    /// Returns an iterator over the `char`s of this string slice and their
    /// unit offsets.
    #[inline]
    pub fn char_indices(&self) -> CharIndices<'_, W> {
        CharIndices::new(self)
    }

    // === Search ===

    /// Returns the unit offset of the first occurrence of `needle`, or
    /// `None` if it does not occur.
    ///
    /// An empty needle matches at offset 0.
    #[inline]
    pub fn find(&self, needle: &UniStr<W>) -> Option<usize> {
        self.find_from(needle, 0)
    }

    /// Returns the unit offset of the first occurrence of `needle` at or
    /// after offset `from`, or `None`.
    pub fn find_from(&self, needle: &UniStr<W>, from: usize) -> Option<usize> {
        if from > self.len() {
            return None;
        }
        if needle.is_empty() {
            return Some(from);
        }
        let hay = &self.units[from..];
        let n = needle.as_units();
        hay.windows(n.len())
            .position(|w| w == n)
            .map(|pos| pos + from)
    }

    /// Returns the unit offset of the last occurrence of `needle`, or
    /// `None` if it does not occur.
    ///
    /// An empty needle matches at the end of the string.
    pub fn rfind(&self, needle: &UniStr<W>) -> Option<usize> {
        if needle.is_empty() {
            return Some(self.len());
        }
        let n = needle.as_units();
        if n.len() > self.len() {
            return None;
        }
        self.units.windows(n.len()).rposition(|w| w == n)
    }

    /// Returns the offset of the first occurrence of a single unit at or
    /// after `from`. Used by the formatter to locate ASCII delimiters.
    #[inline]
    pub(crate) fn find_unit_from(&self, unit: W::Unit, from: usize) -> Option<usize> {
        if from > self.len() {
            return None;
        }
        self.units[from..]
            .iter()
            .position(|&u| u == unit)
            .map(|pos| pos + from)
    }

    /// Returns `true` if `needle` occurs in this string.
    #[inline]
    pub fn contains(&self, needle: &UniStr<W>) -> bool {
        self.find(needle).is_some()
    }

    /// Returns `true` if this string begins with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &UniStr<W>) -> bool {
        self.units.starts_with(prefix.as_units())
    }

    /// Returns `true` if this string ends with `suffix`.
    #[inline]
    pub fn ends_with(&self, suffix: &UniStr<W>) -> bool {
        self.units.ends_with(suffix.as_units())
    }

    // === Split and replace ===

    /// Returns an iterator over substrings separated by `sep`.
    ///
    /// Empty pieces are yielded for leading, trailing, and consecutive
    /// separators, so joining the pieces with `sep` reproduces this string.
    /// An empty separator yields the whole string as a single piece.
    #[inline]
    pub fn split<'h, 'n>(&'h self, sep: &'n UniStr<W>) -> Split<'h, 'n, W> {
        Split::new(self, sep)
    }

    /// Splits this string on the first occurrence of `sep`, returning the
    /// parts before and after it.
    pub fn split_once(&self, sep: &UniStr<W>) -> Option<(&Self, &Self)> {
        let pos = self.find(sep)?;
        // SAFETY: cut at the boundaries of a well-formed separator match
        unsafe {
            Some((
                Self::from_units_unchecked(&self.units[..pos]),
                Self::from_units_unchecked(&self.units[pos + sep.len()..]),
            ))
        }
    }

    /// Returns a new string with all occurrences of `from` replaced by `to`.
    ///
    /// An empty `from` matches nothing; the string is returned unchanged.
    #[inline]
    pub fn replace(&self, from: &UniStr<W>, to: &UniStr<W>) -> UniString<W> {
        self.replacen(from, to, usize::MAX)
    }

    /// Returns a new string with the first `count` occurrences of `from`
    /// replaced by `to`.
    pub fn replacen(&self, from: &UniStr<W>, to: &UniStr<W>, count: usize) -> UniString<W> {
        if from.is_empty() {
            return self.to_unistring();
        }
        let mut out = UniString::with_capacity(self.len());
        let mut last = 0;
        let mut done = 0;
        while done < count {
            match self.find_from(from, last) {
                Some(pos) => {
                    out.push_units(&self.units[last..pos]);
                    out.push_units(to.as_units());
                    last = pos + from.len();
                    done += 1;
                }
                None => break,
            }
        }
        out.push_units(&self.units[last..]);
        out
    }

    // === Conversion ===

    /// Copies this slice into a new owned string.
    #[inline]
    pub fn to_unistring(&self) -> UniString<W> {
        // SAFETY: self is well-formed
        unsafe { UniString::from_units_unchecked(self.units.to_vec()) }
    }

    /// Transcodes this string to UTF-8.
    #[inline]
    pub fn to_utf8(&self) -> UniString<Utf8> {
        // SAFETY: transcoding well-formed input yields well-formed output
        unsafe { UniString::from_units_unchecked(transcode::convert::<W, Utf8>(&self.units)) }
    }

    /// Transcodes this string to UTF-16.
    #[inline]
    pub fn to_utf16(&self) -> UniString<Utf16> {
        // SAFETY: as in `to_utf8`
        unsafe { UniString::from_units_unchecked(transcode::convert::<W, Utf16>(&self.units)) }
    }

    /// Transcodes this string to UTF-32, the canonical scalar projection.
    #[inline]
    pub fn to_utf32(&self) -> UniString<Utf32> {
        // SAFETY: as in `to_utf8`
        unsafe { UniString::from_units_unchecked(transcode::convert::<W, Utf32>(&self.units)) }
    }

    /// Transcodes this string to a standard library `String`.
    #[inline]
    pub fn to_std(&self) -> String {
        self.chars().collect()
    }

    // === Normalization ===

    /// Returns this string normalized to Unicode canonical composition
    /// form (NFC).
    ///
    /// Normalization runs over the scalar projection and collects back into
    /// the same width. The operation is idempotent: normalizing an already
    /// normalized string returns an equal string.
    pub fn normalized(&self) -> UniString<W> {
        self.chars().nfc().collect()
    }
}

// === Slicing via Index ===

#[track_caller]
fn slice_error(start: usize, end: usize, len: usize) -> ! {
    panic!(
        "unit range {}..{} is out of bounds of a string of {} units or not on character boundaries",
        start, end, len
    )
}

impl<W: Width> Index<Range<usize>> for UniStr<W> {
    type Output = UniStr<W>;

    #[track_caller]
    fn index(&self, index: Range<usize>) -> &Self::Output {
        let Range { start, end } = index;
        match self.get(start..end) {
            Some(s) => s,
            None => slice_error(start, end, self.len()),
        }
    }
}

impl<W: Width> Index<RangeFrom<usize>> for UniStr<W> {
    type Output = UniStr<W>;

    #[track_caller]
    fn index(&self, index: RangeFrom<usize>) -> &Self::Output {
        &self[index.start..self.len()]
    }
}

impl<W: Width> Index<RangeTo<usize>> for UniStr<W> {
    type Output = UniStr<W>;

    #[track_caller]
    fn index(&self, index: RangeTo<usize>) -> &Self::Output {
        &self[0..index.end]
    }
}

impl<W: Width> Index<RangeInclusive<usize>> for UniStr<W> {
    type Output = UniStr<W>;

    #[track_caller]
    fn index(&self, index: RangeInclusive<usize>) -> &Self::Output {
        &self[*index.start()..*index.end() + 1]
    }
}

impl<W: Width> Index<RangeToInclusive<usize>> for UniStr<W> {
    type Output = UniStr<W>;

    #[track_caller]
    fn index(&self, index: RangeToInclusive<usize>) -> &Self::Output {
        &self[0..index.end + 1]
    }
}

impl<W: Width> Index<RangeFull> for UniStr<W> {
    type Output = UniStr<W>;

    fn index(&self, _: RangeFull) -> &Self::Output {
        self
    }
}

// === Canonical comparison ===
//
// Equality and ordering project both operands to their scalar (UTF-32)
// sequences and compare those, since code-unit comparison is meaningless
// across widths. The projection is streamed, not materialized.

impl<W1: Width, W2: Width> PartialEq<UniStr<W2>> for UniStr<W1> {
    fn eq(&self, other: &UniStr<W2>) -> bool {
        self.chars().eq(other.chars())
    }
}

impl<W: Width> Eq for UniStr<W> {}

impl<W1: Width, W2: Width> PartialOrd<UniStr<W2>> for UniStr<W1> {
    fn partial_cmp(&self, other: &UniStr<W2>) -> Option<Ordering> {
        Some(self.chars().cmp(other.chars()))
    }
}

impl<W: Width> Ord for UniStr<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chars().cmp(other.chars())
    }
}

impl<W: Width> PartialEq<str> for UniStr<W> {
    fn eq(&self, other: &str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl<W: Width> PartialEq<UniStr<W>> for str {
    fn eq(&self, other: &UniStr<W>) -> bool {
        other == self
    }
}

/// Hashes the canonical scalar projection, so canonically equal strings of
/// any width hash identically. The trailing `0xFF` write mirrors the
/// standard library's `str` hashing, keeping prefixes distinct.
impl<W: Width> Hash for UniStr<W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.chars() {
            state.write_u32(c as u32);
        }
        state.write_u8(0xFF);
    }
}

// === Formatting ===

impl<W: Width> fmt::Display for UniStr<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for c in self.chars() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl<W: Width> fmt::Debug for UniStr<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        f.write_char('"')?;
        for c in self.chars() {
            for esc in c.escape_debug() {
                f.write_char(esc)?;
            }
        }
        f.write_char('"')
    }
}

// === Owned conversion ===

impl<W: Width> ToOwned for UniStr<W> {
    type Owned = UniString<W>;

    fn to_owned(&self) -> UniString<W> {
        self.to_unistring()
    }
}

impl<W: Width> AsRef<[W::Unit]> for UniStr<W> {
    fn as_ref(&self) -> &[W::Unit] {
        self.as_units()
    }
}

impl<'a, W: Width> Default for &'a UniStr<W> {
    fn default() -> Self {
        // SAFETY: the empty slice is trivially well-formed
        unsafe { UniStr::from_units_unchecked(&[]) }
    }
}

#[cfg(test)]
mod tests {
    use crate::{UniString, Utf8, Utf16, Utf32};

    fn utf16(s: &str) -> UniString<Utf16> {
        UniString::from(s)
    }

    #[test]
    fn test_find_and_rfind() {
        let s = utf16("abcabc");
        let needle = utf16("bc");

        assert_eq!(s.find(&needle), Some(1));
        assert_eq!(s.find_from(&needle, 2), Some(4));
        assert_eq!(s.rfind(&needle), Some(4));
        assert_eq!(s.find(&utf16("zz")), None);
    }

    #[test]
    fn test_find_empty_needle() {
        let s = utf16("ab");
        let empty = utf16("");

        assert_eq!(s.find(&empty), Some(0));
        assert_eq!(s.find_from(&empty, 2), Some(2));
        assert_eq!(s.rfind(&empty), Some(2));
    }

    #[test]
    fn test_find_offsets_are_units() {
        // '😀' is two UTF-16 units, so 'x' starts at unit 2
        let s = utf16("😀x");
        assert_eq!(s.find(&utf16("x")), Some(2));

        let s8: UniString<Utf8> = UniString::from("😀x");
        assert_eq!(s8.find(&UniString::<Utf8>::from("x")), Some(4));
    }

    #[test]
    fn test_contains_prefix_suffix() {
        let s = utf16("héllo");
        assert!(s.contains(&utf16("éll")));
        assert!(s.starts_with(&utf16("hé")));
        assert!(s.ends_with(&utf16("lo")));
        assert!(!s.starts_with(&utf16("é")));
    }

    #[test]
    fn test_split_keeps_empty_pieces() {
        let s = utf16(",a,,b,");
        let sep = utf16(",");
        let pieces: Vec<String> = s.split(&sep).map(|p| p.to_std()).collect();
        assert_eq!(pieces, ["", "a", "", "b", ""]);
    }

    #[test]
    fn test_split_absent_and_empty_separator() {
        let s = utf16("abc");

        let pieces: Vec<String> = s.split(&utf16("x")).map(|p| p.to_std()).collect();
        assert_eq!(pieces, ["abc"]);

        let pieces: Vec<String> = s.split(&utf16("")).map(|p| p.to_std()).collect();
        assert_eq!(pieces, ["abc"]);
    }

    #[test]
    fn test_split_join_roundtrip() {
        let s = utf16("a::b::c");
        let sep = utf16("::");

        let mut joined = UniString::<Utf16>::new();
        for (i, piece) in s.split(&sep).enumerate() {
            if i > 0 {
                joined.push_str(&sep);
            }
            joined.push_str(piece);
        }
        assert_eq!(joined, s);
    }

    #[test]
    fn test_split_once() {
        let s = utf16("key=value=tail");
        let (k, v) = s.split_once(&utf16("=")).unwrap();
        assert_eq!(k, "key");
        assert_eq!(v, "value=tail");

        assert!(s.split_once(&utf16("#")).is_none());
    }

    #[test]
    fn test_replace() {
        let s = utf16("one two two");
        assert_eq!(s.replace(&utf16("two"), &utf16("2")), "one 2 2");
        assert_eq!(s.replacen(&utf16("two"), &utf16("2"), 1), "one 2 two");
        assert_eq!(s.replace(&utf16(""), &utf16("x")), "one two two");
    }

    #[test]
    fn test_substr() {
        let s = utf16("héllo");
        assert_eq!(s.substr(1, Some(3)), "éll");
        assert_eq!(s.substr(2, None), "llo");
        assert_eq!(s.substr(0, Some(0)), "");
    }

    #[test]
    #[should_panic]
    fn test_substr_mid_pair() {
        let s = utf16("h😀");
        s.substr(0, Some(2));
    }

    #[test]
    fn test_get_rejects_mid_character() {
        let s: UniString<Utf8> = UniString::from("héllo");
        assert!(s.get(1..2).is_none());
        assert!(s.get(1..3).is_some());
        assert!(s.get(0..10).is_none());
    }

    #[test]
    fn test_cross_width_equality() {
        let a: UniString<Utf8> = UniString::from("héllo 😀");
        let b: UniString<Utf16> = UniString::from("héllo 😀");
        let c: UniString<Utf32> = UniString::from("héllo 😀");

        assert_eq!(*a, *b);
        assert_eq!(*b, *c);
        assert_ne!(*a, *UniString::<Utf16>::from("héllo"));
    }

    #[test]
    fn test_cross_width_ordering() {
        let a: UniString<Utf8> = UniString::from("apple");
        let b: UniString<Utf16> = UniString::from("banana");

        assert!(*a < *b);
        assert!(*b > *a);
        // Scalar order, not unit order: U+FF21 sorts after U+0061 in every width
        let x: UniString<Utf8> = UniString::from("a");
        let y: UniString<Utf32> = UniString::from("\u{FF21}");
        assert!(*x < *y);
    }

    #[test]
    fn test_hash_agrees_across_widths() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }

        let a: UniString<Utf8> = UniString::from("héllo 😀");
        let b: UniString<Utf16> = UniString::from("héllo 😀");
        let c: UniString<Utf32> = UniString::from("héllo 😀");

        assert_eq!(hash_of(&*a), hash_of(&*b));
        assert_eq!(hash_of(&*b), hash_of(&*c));
    }

    #[test]
    fn test_transcoding_projections() {
        let s: UniString<Utf8> = UniString::from("héllo 😀");

        assert_eq!(s.to_utf16().as_units(), {
            let v: Vec<u16> = "héllo 😀".encode_utf16().collect();
            v
        });
        assert_eq!(s.to_utf32().as_units(), {
            let v: Vec<u32> = "héllo 😀".chars().map(|c| c as u32).collect();
            v
        });
        assert_eq!(s.to_utf8(), s);
        assert_eq!(s.to_std(), "héllo 😀");
    }

    #[test]
    fn test_normalized() {
        // 'e' + combining acute composes to 'é'
        let decomposed: UniString<Utf16> = UniString::from("e\u{301}");
        let composed = decomposed.normalized();

        assert_eq!(composed, "é");
        assert_eq!(composed.normalized(), composed);
    }

    #[test]
    fn test_display_and_debug() {
        let s = utf16("hé\n");
        assert_eq!(format!("{}", s), "hé\n");
        assert_eq!(format!("{:?}", s), "\"hé\\n\"");
    }

    #[test]
    fn test_chars_reverse() {
        let s = utf16("h😀é");
        let forward: Vec<char> = s.chars().collect();
        let mut backward: Vec<char> = s.chars().rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_char_indices() {
        let s = utf16("h😀é");
        let indices: Vec<(usize, char)> = s.char_indices().collect();
        assert_eq!(indices, [(0, 'h'), (1, '😀'), (3, 'é')]);
    }
}
