use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::UniStr;
use crate::width::Width;

/// An iterator over the `char`s of a string slice.
pub struct Chars<'a, W: Width> {
    units: &'a [W::Unit],
    offset: usize,
    _marker: PhantomData<W>,
}

impl<W: Width> Clone for Chars<'_, W> {
    fn clone(&self) -> Self {
        Self {
            units: self.units,
            offset: self.offset,
            _marker: PhantomData,
        }
    }
}

impl<'a, W: Width> Chars<'a, W> {
    #[inline]
    pub(crate) fn new(s: &'a UniStr<W>) -> Self {
        Self::from_units(s.as_units())
    }

    #[inline]
    pub(crate) fn from_units(units: &'a [W::Unit]) -> Self {
        Self {
            units,
            offset: 0,
            _marker: PhantomData,
        }
    }

    /// Views the underlying data as a subslice of the original data.
    #[inline]
    pub fn as_unistr(&self) -> &'a UniStr<W> {
        // SAFETY: the offset only advances to character boundaries
        unsafe { UniStr::from_units_unchecked(&self.units[self.offset..]) }
    }
}

impl<W: Width> Iterator for Chars<'_, W> {
    type Item = char;

    #[inline]
    fn next(&mut self) -> Option<char> {
        if self.offset >= self.units.len() {
            return None;
        }
        let (c, next_offset) = W::decode_char_at(self.units, self.offset)?;
        self.offset = next_offset;
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.units.len() - self.offset;
        let min = remaining.div_ceil(W::MAX_CHAR_UNITS);
        (min, Some(remaining))
    }
}

impl<W: Width> DoubleEndedIterator for Chars<'_, W> {
    #[inline]
    fn next_back(&mut self) -> Option<char> {
        if self.offset >= self.units.len() {
            return None;
        }
        let (c, start) = W::decode_char_before(self.units, self.units.len())?;
        self.units = &self.units[..start];
        Some(c)
    }
}

impl<W: Width> FusedIterator for Chars<'_, W> {}

impl<W: Width> core::fmt::Debug for Chars<'_, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Chars")
            .field("remaining", &self.as_unistr())
            .finish()
    }
}

/// An iterator over the `char`s of a string slice and their unit offsets.
pub struct CharIndices<'a, W: Width> {
    units: &'a [W::Unit],
    offset: usize,
    _marker: PhantomData<W>,
}

impl<W: Width> Clone for CharIndices<'_, W> {
    fn clone(&self) -> Self {
        Self {
            units: self.units,
            offset: self.offset,
            _marker: PhantomData,
        }
    }
}

impl<'a, W: Width> CharIndices<'a, W> {
    #[inline]
    pub(crate) fn new(s: &'a UniStr<W>) -> Self {
        Self {
            units: s.as_units(),
            offset: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the unit offset of the next character, or the length of the
    /// underlying string if there are no more characters.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<W: Width> Iterator for CharIndices<'_, W> {
    type Item = (usize, char);

    #[inline]
    fn next(&mut self) -> Option<(usize, char)> {
        if self.offset >= self.units.len() {
            return None;
        }
        let (c, next_offset) = W::decode_char_at(self.units, self.offset)?;
        let index = self.offset;
        self.offset = next_offset;
        Some((index, c))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.units.len() - self.offset;
        let min = remaining.div_ceil(W::MAX_CHAR_UNITS);
        (min, Some(remaining))
    }
}

impl<W: Width> FusedIterator for CharIndices<'_, W> {}

/// An iterator over substrings separated by a unit-sequence separator.
///
/// Created by [`UniStr::split`]. Empty pieces are yielded for leading,
/// trailing, and consecutive separators, so joining the pieces with the
/// separator reproduces the input exactly.
pub struct Split<'h, 'n, W: Width> {
    haystack: &'h UniStr<W>,
    sep: &'n UniStr<W>,
    offset: usize,
    finished: bool,
}

impl<'h, 'n, W: Width> Split<'h, 'n, W> {
    #[inline]
    pub(crate) fn new(haystack: &'h UniStr<W>, sep: &'n UniStr<W>) -> Self {
        Self {
            haystack,
            sep,
            offset: 0,
            finished: false,
        }
    }
}

impl<W: Width> Clone for Split<'_, '_, W> {
    fn clone(&self) -> Self {
        Self {
            haystack: self.haystack,
            sep: self.sep,
            offset: self.offset,
            finished: self.finished,
        }
    }
}

impl<'h, W: Width> Iterator for Split<'h, '_, W> {
    type Item = &'h UniStr<W>;

    fn next(&mut self) -> Option<&'h UniStr<W>> {
        if self.finished {
            return None;
        }

        // An empty separator never matches: the whole string is one piece
        if self.sep.is_empty() {
            self.finished = true;
            return Some(self.haystack);
        }

        let units = self.haystack.as_units();
        match self.haystack.find_from(self.sep, self.offset) {
            Some(pos) => {
                let piece = &units[self.offset..pos];
                self.offset = pos + self.sep.len();
                // SAFETY: pieces are cut at match boundaries of a
                // well-formed separator within a well-formed string
                Some(unsafe { UniStr::from_units_unchecked(piece) })
            }
            None => {
                self.finished = true;
                let piece = &units[self.offset..];
                // SAFETY: as above
                Some(unsafe { UniStr::from_units_unchecked(piece) })
            }
        }
    }
}

impl<W: Width> FusedIterator for Split<'_, '_, W> {}

impl<W: Width> core::fmt::Debug for Split<'_, '_, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Split")
            .field("haystack", &self.haystack)
            .field("sep", &self.sep)
            .field("offset", &self.offset)
            .finish()
    }
}

/// A draining iterator over a removed range of a [`UniString`].
///
/// Created by [`UniString::drain`]. The range is removed from the string
/// when the iterator is dropped, even if it was not fully consumed.
///
/// [`UniString`]: crate::UniString
/// [`UniString::drain`]: crate::UniString::drain
pub struct Drain<'a, W: Width> {
    /// Start of the drain range, in units
    start: usize,
    /// End of the drain range, in units
    end: usize,
    /// Iterator over the chars being drained
    iter: Chars<'a, W>,
    /// Pointer back to the string (for removal on drop)
    string: *mut crate::UniString<W>,
}

impl<'a, W: Width> Drain<'a, W> {
    pub(crate) fn new(string: &'a mut crate::UniString<W>, start: usize, end: usize) -> Self {
        let ptr = string as *mut crate::UniString<W>;
        // SAFETY: the slice borrows the drained range; the string itself is
        // only touched again in Drop, after the borrow ends
        let slice =
            unsafe { core::slice::from_raw_parts(string.as_units().as_ptr().add(start), end - start) };
        Self {
            start,
            end,
            iter: Chars::from_units(slice),
            string: ptr,
        }
    }

    /// Returns the remaining (not yet drained) characters as a string slice.
    #[inline]
    pub fn as_unistr(&self) -> &UniStr<W> {
        self.iter.as_unistr()
    }
}

impl<W: Width> Iterator for Drain<'_, W> {
    type Item = char;

    #[inline]
    fn next(&mut self) -> Option<char> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<W: Width> DoubleEndedIterator for Drain<'_, W> {
    #[inline]
    fn next_back(&mut self) -> Option<char> {
        self.iter.next_back()
    }
}

impl<W: Width> FusedIterator for Drain<'_, W> {}

impl<W: Width> Drop for Drain<'_, W> {
    fn drop(&mut self) {
        // SAFETY: the pointer came from a live &mut UniString and the range
        // was boundary-checked on construction
        unsafe {
            (*self.string).units_vec_mut().drain(self.start..self.end);
        }
    }
}

impl<W: Width> core::fmt::Debug for Drain<'_, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Drain")
            .field("remaining", &self.as_unistr())
            .finish()
    }
}

// SAFETY: Drain owns no thread-affine state; the raw pointer is only used
// under the exclusive borrow it was created from
unsafe impl<W: Width> Send for Drain<'_, W> where W::Unit: Send {}
unsafe impl<W: Width> Sync for Drain<'_, W> where W::Unit: Sync {}
