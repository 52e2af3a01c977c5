use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Deref, DerefMut, Index, Range, RangeBounds};
use core::str::FromStr;

use crate::UniStr;
use crate::error::{FormatError, FromUnitsError};
use crate::format;
use crate::iter::Drain;
use crate::transcode;
use crate::width::{CodeUnit, Width};

/// An owned, growable string of width `W`.
///
/// The buffer is a vector of the width's native code units, always held in
/// a well-formed state. `UniString` dereferences to [`UniStr<W>`], which
/// carries the read-only operations.
///
/// ```
/// use unistring::{UniString, Utf16};
///
/// let mut s: UniString<Utf16> = UniString::from("hé");
/// s.push('😀');
/// assert_eq!(s.len(), 4); // 'h' + 'é' + surrogate pair
/// assert_eq!(s, "hé😀");
/// ```
pub struct UniString<W: Width> {
    units: Vec<W::Unit>,
    _marker: PhantomData<W>,
}

impl<W: Width> UniString<W> {
    // === Construction ===

    /// Creates a new empty string.
    #[inline]
    pub const fn new() -> Self {
        Self {
            units: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Creates a new empty string with at least the given unit capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            units: Vec::with_capacity(capacity),
            _marker: PhantomData,
        }
    }

    /// Converts a vector of code units into a string.
    ///
    /// On malformed input, the vector is handed back inside the error.
    pub fn from_units(units: Vec<W::Unit>) -> Result<Self, FromUnitsError<W>> {
        match W::validate(&units) {
            Ok(()) => Ok(unsafe { Self::from_units_unchecked(units) }),
            Err(error) => Err(FromUnitsError::new(units, error)),
        }
    }

    /// Converts a vector of code units into a string, dropping everything
    /// from the first malformed unit onward.
    ///
    /// This is the lenient construction path: well-formed input is taken
    /// whole, otherwise the well-formed prefix is kept.
    pub fn from_units_truncating(mut units: Vec<W::Unit>) -> Self {
        let read = transcode::decode::<W>(&units).units_read;
        units.truncate(read);
        // SAFETY: truncated at the end of the well-formed prefix
        unsafe { Self::from_units_unchecked(units) }
    }

    /// Converts a vector of code units into a string without checking
    /// validity.
    ///
    /// # Safety
    ///
    /// The units must be well-formed for width `W`.
    #[inline]
    pub unsafe fn from_units_unchecked(units: Vec<W::Unit>) -> Self {
        Self {
            units,
            _marker: PhantomData,
        }
    }

    /// Reads a zero-terminated run of code units from a raw pointer and
    /// converts the well-formed prefix into a string.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a readable sequence of units terminated by a
    /// zero unit.
    pub unsafe fn from_ptr(ptr: *const W::Unit) -> Self {
        let mut len = 0;
        // SAFETY: caller guarantees a zero terminator is reachable
        unsafe {
            while *ptr.add(len) != W::Unit::ZERO {
                len += 1;
            }
            Self::from_units_truncating(core::slice::from_raw_parts(ptr, len).to_vec())
        }
    }

    /// Renders `template` with `args` substituted for `{index}` markers.
    ///
    /// Shorthand for [`append_format`](Self::append_format) on an empty
    /// string.
    pub fn from_format(
        template: &UniStr<W>,
        args: &[&dyn fmt::Display],
    ) -> Result<Self, FormatError> {
        format::render(template, args)
    }

    // === Capacity ===

    /// Returns the capacity of the buffer in units.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.units.capacity()
    }

    /// Reserves capacity for at least `additional` more units.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.units.reserve(additional);
    }

    /// Reserves the minimum capacity for exactly `additional` more units.
    #[inline]
    pub fn reserve_exact(&mut self, additional: usize) {
        self.units.reserve_exact(additional);
    }

    /// Shrinks the capacity of the buffer as much as possible.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.units.shrink_to_fit();
    }

    // === Views ===

    /// Returns a string slice over the whole string.
    #[inline]
    pub fn as_unistr(&self) -> &UniStr<W> {
        // SAFETY: the buffer is always well-formed
        unsafe { UniStr::from_units_unchecked(&self.units) }
    }

    /// Returns the underlying code units.
    #[inline]
    pub fn as_units(&self) -> &[W::Unit] {
        &self.units
    }

    /// Consumes the string, returning its code units.
    #[inline]
    pub fn into_units(self) -> Vec<W::Unit> {
        self.units
    }

    #[inline]
    pub(crate) fn units_vec_mut(&mut self) -> &mut Vec<W::Unit> {
        &mut self.units
    }

    /// Appends a raw well-formed unit run. Internal building block for
    /// replace and the formatter; callers cut only at match or boundary
    /// positions.
    #[inline]
    pub(crate) fn push_units(&mut self, units: &[W::Unit]) {
        self.units.extend_from_slice(units);
    }

    // === Mutation ===

    /// Appends a character to the end of the string.
    pub fn push(&mut self, c: char) {
        let mut buf = [W::Unit::ZERO; 4];
        let len = W::encode_char(c, &mut buf[..W::MAX_CHAR_UNITS]);
        self.units.extend_from_slice(&buf[..len]);
    }

    /// Appends a string slice to the end of this string.
    #[inline]
    pub fn push_str(&mut self, s: &UniStr<W>) {
        self.units.extend_from_slice(s.as_units());
    }

    /// Removes the last character and returns it, or `None` if the string
    /// is empty.
    pub fn pop(&mut self) -> Option<char> {
        let (c, start) = W::decode_char_before(&self.units, self.units.len())?;
        self.units.truncate(start);
        Some(c)
    }

    /// Inserts a character at the given unit offset.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or not a character boundary.
    pub fn insert(&mut self, index: usize, c: char) {
        assert!(
            self.as_unistr().is_char_boundary(index) && index <= self.units.len(),
            "insertion index {} is out of bounds or not a character boundary",
            index
        );
        let mut buf = [W::Unit::ZERO; 4];
        let len = W::encode_char(c, &mut buf[..W::MAX_CHAR_UNITS]);
        self.units.splice(index..index, buf[..len].iter().copied());
    }

    /// Inserts a string slice at the given unit offset.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or not a character boundary.
    pub fn insert_str(&mut self, index: usize, s: &UniStr<W>) {
        assert!(
            self.as_unistr().is_char_boundary(index) && index <= self.units.len(),
            "insertion index {} is out of bounds or not a character boundary",
            index
        );
        self.units
            .splice(index..index, s.as_units().iter().copied());
    }

    /// Removes and returns the character at the given unit offset.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not start a character.
    pub fn remove(&mut self, index: usize) -> char {
        let (c, next) = match W::decode_char_at(&self.units, index) {
            Some(v) => v,
            None => panic!("no character starts at unit offset {}", index),
        };
        self.units.drain(index..next);
        c
    }

    /// Removes the given unit range and returns an iterator over its
    /// characters. The range is removed even if the iterator is dropped
    /// unconsumed.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or either end is not a
    /// character boundary.
    pub fn drain<R: RangeBounds<usize>>(&mut self, range: R) -> Drain<'_, W> {
        let Range { start, end } = resolve_range(range, self.units.len());
        assert!(
            start <= end && end <= self.units.len(),
            "drain range {}..{} is out of bounds of a string of {} units",
            start,
            end,
            self.units.len()
        );
        assert!(
            self.as_unistr().is_char_boundary(start) && self.as_unistr().is_char_boundary(end),
            "drain range {}..{} does not lie on character boundaries",
            start,
            end
        );
        Drain::new(self, start, end)
    }

    /// Replaces the given unit range with another string slice.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or either end is not a
    /// character boundary.
    pub fn replace_range<R: RangeBounds<usize>>(&mut self, range: R, replacement: &UniStr<W>) {
        let Range { start, end } = resolve_range(range, self.units.len());
        assert!(
            start <= end && end <= self.units.len(),
            "replacement range {}..{} is out of bounds of a string of {} units",
            start,
            end,
            self.units.len()
        );
        assert!(
            self.as_unistr().is_char_boundary(start) && self.as_unistr().is_char_boundary(end),
            "replacement range {}..{} does not lie on character boundaries",
            start,
            end
        );
        self.units
            .splice(start..end, replacement.as_units().iter().copied());
    }

    /// Shortens the string to `new_len` units, dropping the rest.
    ///
    /// Does nothing if `new_len` is not shorter than the current length.
    ///
    /// # Panics
    ///
    /// Panics if `new_len` is not a character boundary.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len < self.units.len() {
            assert!(
                self.as_unistr().is_char_boundary(new_len),
                "truncation at unit offset {} is not a character boundary",
                new_len
            );
            self.units.truncate(new_len);
        }
    }

    /// Splits the string into two at the given unit offset, returning the
    /// tail.
    ///
    /// # Panics
    ///
    /// Panics if `at` is out of bounds or not a character boundary.
    pub fn split_off(&mut self, at: usize) -> Self {
        assert!(
            at <= self.units.len() && self.as_unistr().is_char_boundary(at),
            "split offset {} is out of bounds or not a character boundary",
            at
        );
        let tail = self.units.split_off(at);
        // SAFETY: cut at a character boundary, both halves stay well-formed
        unsafe { Self::from_units_unchecked(tail) }
    }

    /// Empties the string, keeping the allocated buffer.
    #[inline]
    pub fn clear(&mut self) {
        self.units.clear();
    }

    // === Formatting ===

    /// Renders `template` with `args` substituted for `{index}` markers and
    /// appends the result to this string.
    ///
    /// The rendering is all-or-nothing: on error this string is untouched.
    /// `{N}` substitutes the `N`-th argument's `Display` output; a doubled
    /// `{{` passes through as two literal braces. A `{` not followed by a
    /// well-formed closed marker passes through unchanged.
    pub fn append_format(
        &mut self,
        template: &UniStr<W>,
        args: &[&dyn fmt::Display],
    ) -> Result<(), FormatError> {
        let rendered = format::render(template, args)?;
        self.units.extend_from_slice(rendered.as_units());
        Ok(())
    }

    // === Normalization ===

    /// Normalizes this string in place to Unicode canonical composition
    /// form (NFC).
    pub fn normalize(&mut self) {
        *self = self.as_unistr().normalized();
    }
}

fn resolve_range<R: RangeBounds<usize>>(range: R, len: usize) -> Range<usize> {
    use core::ops::Bound;
    let start = match range.start_bound() {
        Bound::Included(&n) => n,
        Bound::Excluded(&n) => n + 1,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&n) => n + 1,
        Bound::Excluded(&n) => n,
        Bound::Unbounded => len,
    };
    start..end
}

// === Deref to the slice type ===

impl<W: Width> Deref for UniString<W> {
    type Target = UniStr<W>;

    #[inline]
    fn deref(&self) -> &UniStr<W> {
        self.as_unistr()
    }
}

impl<W: Width> DerefMut for UniString<W> {
    #[inline]
    fn deref_mut(&mut self) -> &mut UniStr<W> {
        // SAFETY: the buffer is always well-formed; UniStr is a transparent
        // wrapper around [W::Unit]
        unsafe { &mut *(self.units.as_mut_slice() as *mut [W::Unit] as *mut UniStr<W>) }
    }
}

impl<W: Width> Borrow<UniStr<W>> for UniString<W> {
    #[inline]
    fn borrow(&self) -> &UniStr<W> {
        self.as_unistr()
    }
}

impl<W: Width> AsRef<UniStr<W>> for UniString<W> {
    #[inline]
    fn as_ref(&self) -> &UniStr<W> {
        self.as_unistr()
    }
}

impl<W: Width> AsRef<[W::Unit]> for UniString<W> {
    #[inline]
    fn as_ref(&self) -> &[W::Unit] {
        &self.units
    }
}

// === Core trait impls ===

impl<W: Width> Clone for UniString<W> {
    fn clone(&self) -> Self {
        Self {
            units: self.units.clone(),
            _marker: PhantomData,
        }
    }
}

impl<W: Width> Default for UniString<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Width> fmt::Display for UniString<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_unistr(), f)
    }
}

impl<W: Width> fmt::Debug for UniString<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_unistr(), f)
    }
}

impl<W: Width> Hash for UniString<W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_unistr().hash(state);
    }
}

impl<W1: Width, W2: Width> PartialEq<UniString<W2>> for UniString<W1> {
    fn eq(&self, other: &UniString<W2>) -> bool {
        self.as_unistr() == other.as_unistr()
    }
}

impl<W1: Width, W2: Width> PartialEq<UniStr<W2>> for UniString<W1> {
    fn eq(&self, other: &UniStr<W2>) -> bool {
        self.as_unistr() == other
    }
}

impl<W1: Width, W2: Width> PartialEq<&UniStr<W2>> for UniString<W1> {
    fn eq(&self, other: &&UniStr<W2>) -> bool {
        self.as_unistr() == *other
    }
}

impl<W1: Width, W2: Width> PartialEq<UniString<W2>> for UniStr<W1> {
    fn eq(&self, other: &UniString<W2>) -> bool {
        self == other.as_unistr()
    }
}

impl<W: Width> Eq for UniString<W> {}

impl<W1: Width, W2: Width> PartialOrd<UniString<W2>> for UniString<W1> {
    fn partial_cmp(&self, other: &UniString<W2>) -> Option<Ordering> {
        self.as_unistr().partial_cmp(other.as_unistr())
    }
}

impl<W: Width> Ord for UniString<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_unistr().cmp(other.as_unistr())
    }
}

impl<W: Width> PartialEq<str> for UniString<W> {
    fn eq(&self, other: &str) -> bool {
        self.as_unistr() == other
    }
}

impl<W: Width> PartialEq<&str> for UniString<W> {
    fn eq(&self, other: &&str) -> bool {
        self.as_unistr() == *other
    }
}

impl<W: Width> PartialEq<UniString<W>> for str {
    fn eq(&self, other: &UniString<W>) -> bool {
        other.as_unistr() == self
    }
}

impl<W: Width> PartialEq<UniString<W>> for &str {
    fn eq(&self, other: &UniString<W>) -> bool {
        other.as_unistr() == *self
    }
}

// === Conversions ===

impl<W: Width> From<&UniStr<W>> for UniString<W> {
    fn from(s: &UniStr<W>) -> Self {
        s.to_unistring()
    }
}

impl<W: Width> From<&str> for UniString<W> {
    fn from(s: &str) -> Self {
        s.chars().collect()
    }
}

impl<W: Width> From<char> for UniString<W> {
    fn from(c: char) -> Self {
        let mut s = Self::new();
        s.push(c);
        s
    }
}

impl<W: Width> FromStr for UniString<W> {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl<W: Width> FromIterator<char> for UniString<W> {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

impl<'a, W: Width> FromIterator<&'a UniStr<W>> for UniString<W> {
    fn from_iter<I: IntoIterator<Item = &'a UniStr<W>>>(iter: I) -> Self {
        let mut s = Self::new();
        for piece in iter {
            s.push_str(piece);
        }
        s
    }
}

impl<W: Width> Extend<char> for UniString<W> {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower);
        for c in iter {
            self.push(c);
        }
    }
}

impl<'a, W: Width> Extend<&'a UniStr<W>> for UniString<W> {
    fn extend<I: IntoIterator<Item = &'a UniStr<W>>>(&mut self, iter: I) {
        for piece in iter {
            self.push_str(piece);
        }
    }
}

// === Operators ===

impl<W: Width> Add<&UniStr<W>> for UniString<W> {
    type Output = UniString<W>;

    fn add(mut self, rhs: &UniStr<W>) -> Self {
        self.push_str(rhs);
        self
    }
}

impl<W: Width> AddAssign<&UniStr<W>> for UniString<W> {
    fn add_assign(&mut self, rhs: &UniStr<W>) {
        self.push_str(rhs);
    }
}

impl<W: Width, I> Index<I> for UniString<W>
where
    UniStr<W>: Index<I, Output = UniStr<W>>,
{
    type Output = UniStr<W>;

    #[inline]
    fn index(&self, index: I) -> &UniStr<W> {
        &self.as_unistr()[index]
    }
}

impl<W: Width> fmt::Write for UniString<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            self.push(c);
        }
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.push(c);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Utf8, Utf16, Utf32};

    #[test]
    fn test_push_pop() {
        let mut s: UniString<Utf16> = UniString::new();
        s.push('h');
        s.push('é');
        s.push('😀');
        assert_eq!(s.len(), 4);

        assert_eq!(s.pop(), Some('😀'));
        assert_eq!(s.pop(), Some('é'));
        assert_eq!(s.pop(), Some('h'));
        assert_eq!(s.pop(), None);
    }

    #[test]
    fn test_from_units() {
        let s = UniString::<Utf8>::from_units(b"h\xC3\xA9llo".to_vec()).unwrap();
        assert_eq!(s, "héllo");

        let err = UniString::<Utf8>::from_units(b"h\xFFi".to_vec()).unwrap_err();
        assert_eq!(err.decode_error().valid_up_to(), 1);
        assert_eq!(err.into_units(), b"h\xFFi".to_vec());
    }

    #[test]
    fn test_from_units_truncating() {
        let s = UniString::<Utf8>::from_units_truncating(b"hi\xFFdropped".to_vec());
        assert_eq!(s, "hi");

        let s = UniString::<Utf16>::from_units_truncating(vec![0x68, 0xD800]);
        assert_eq!(s, "h");
    }

    #[test]
    fn test_from_ptr() {
        let bytes = b"h\xC3\xA9llo\0".to_vec();
        let s = unsafe { UniString::<Utf8>::from_ptr(bytes.as_ptr()) };
        assert_eq!(s, "héllo");

        let units: Vec<u16> = "h😀".encode_utf16().chain([0]).collect();
        let s = unsafe { UniString::<Utf16>::from_ptr(units.as_ptr()) };
        assert_eq!(s, "h😀");

        let units: Vec<u32> = "héllo".chars().map(|c| c as u32).chain([0]).collect();
        let s = unsafe { UniString::<Utf32>::from_ptr(units.as_ptr()) };
        assert_eq!(s, "héllo");
    }

    #[test]
    fn test_from_ptr_empty_and_malformed() {
        let empty = [0u16];
        let s = unsafe { UniString::<Utf16>::from_ptr(empty.as_ptr()) };
        assert!(s.is_empty());

        // Lone high surrogate before the terminator: prefix is kept
        let units = [0x68, 0xD800, 0x69, 0];
        let s = unsafe { UniString::<Utf16>::from_ptr(units.as_ptr()) };
        assert_eq!(s, "h");
    }

    #[test]
    fn test_insert_remove() {
        let mut s: UniString<Utf8> = UniString::from("hllo");
        s.insert(1, 'é');
        assert_eq!(s, "héllo");

        assert_eq!(s.remove(1), 'é');
        assert_eq!(s, "hllo");
    }

    #[test]
    #[should_panic]
    fn test_insert_mid_character() {
        let mut s: UniString<Utf8> = UniString::from("é");
        s.insert(1, 'x');
    }

    #[test]
    fn test_insert_str() {
        let mut s: UniString<Utf32> = UniString::from("ac");
        let b: UniString<Utf32> = UniString::from("b");
        s.insert_str(1, &b);
        assert_eq!(s, "abc");
    }

    #[test]
    fn test_drain() {
        let mut s: UniString<Utf8> = UniString::from("héllo");

        let drained: Vec<char> = s.drain(1..3).collect();
        assert_eq!(drained, vec!['é']);
        assert_eq!(s, "hllo");
    }

    #[test]
    fn test_drain_unconsumed_still_removes() {
        let mut s: UniString<Utf8> = UniString::from("héllo");
        drop(s.drain(0..3));
        assert_eq!(s, "llo");
    }

    #[test]
    #[should_panic]
    fn test_drain_mid_character() {
        let mut s: UniString<Utf8> = UniString::from("héllo");
        s.drain(1..2);
    }

    #[test]
    fn test_replace_range() {
        let mut s: UniString<Utf8> = UniString::from("héllo");
        let bye: UniString<Utf8> = UniString::from("bye");
        s.replace_range(0..3, &bye);
        assert_eq!(s, "byello");
    }

    #[test]
    fn test_truncate() {
        let mut s: UniString<Utf16> = UniString::from("h😀x");
        s.truncate(3);
        assert_eq!(s, "h😀");

        // Longer than the string is a no-op
        s.truncate(100);
        assert_eq!(s, "h😀");
    }

    #[test]
    #[should_panic]
    fn test_truncate_mid_pair() {
        let mut s: UniString<Utf16> = UniString::from("h😀");
        s.truncate(2);
    }

    #[test]
    fn test_split_off() {
        let mut s: UniString<Utf8> = UniString::from("héllo");
        let tail = s.split_off(3);
        assert_eq!(s, "hé");
        assert_eq!(tail, "llo");
    }

    #[test]
    fn test_normalize_in_place() {
        // "é" as 'e' + combining acute
        let mut s: UniString<Utf8> = UniString::from("e\u{301}");
        assert_eq!(s.len(), 3);
        s.normalize();
        assert_eq!(s.len(), 2);
        assert_eq!(s, "é");
    }

    #[test]
    fn test_collect_and_extend() {
        let s: UniString<Utf32> = "héllo".chars().collect();
        assert_eq!(s, "héllo");

        let mut s: UniString<Utf16> = UniString::from("ab");
        s.extend("cd".chars());
        assert_eq!(s, "abcd");
    }

    #[test]
    fn test_add() {
        let a: UniString<Utf8> = UniString::from("foo");
        let b: UniString<Utf8> = UniString::from("bar");
        assert_eq!(a + &b, "foobar");
    }

    #[test]
    fn test_fmt_write() {
        use core::fmt::Write;

        let mut s: UniString<Utf16> = UniString::new();
        write!(s, "n = {}", 42).unwrap();
        assert_eq!(s, "n = 42");
    }

    #[test]
    fn test_index_ranges() {
        let s: UniString<Utf8> = UniString::from("héllo");
        assert_eq!(&s[0..1], "h");
        assert_eq!(&s[1..3], "é");
        assert_eq!(&s[3..], "llo");
        assert_eq!(&s[..], "héllo");
    }
}
