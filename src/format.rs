//! Positional `{index}` template rendering.
//!
//! The template language has one construct: `{N}` substitutes the `N`-th
//! argument's `Display` output. A doubled `{{` passes through as two
//! literal braces, and a `{` that does not open a well-formed marker (no
//! closing `}` before the end of input) passes through unchanged.
//! Everything else, `}` included, is copied verbatim.
//!
//! Rendering is all-or-nothing: output is built in a fresh buffer and only
//! handed back on success, so a failed render never leaves a partially
//! substituted string behind.

use core::fmt::Display;

use crate::error::FormatError;
use crate::width::{CodeUnit, Width};
use crate::{UniStr, UniString};

/// Renders `template`, substituting `args` into `{index}` markers.
///
/// Delimiters are ASCII, and ASCII units never occur inside a multi-unit
/// character in any width, so scanning unit-by-unit for braces cannot cut a
/// character in half.
pub(crate) fn render<W: Width>(
    template: &UniStr<W>,
    args: &[&dyn Display],
) -> Result<UniString<W>, FormatError> {
    let open = W::Unit::from_ascii(b'{');
    let close = W::Unit::from_ascii(b'}');

    // Render every argument once up front; markers may repeat an index.
    let rendered: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();

    let units = template.as_units();
    let mut out = UniString::with_capacity(template.len());
    let mut cursor = 0;

    while let Some(brace) = template.find_unit_from(open, cursor) {
        out.push_units(&units[cursor..brace]);

        // Doubled opening brace: both pass through, no marker starts
        if units.get(brace + 1) == Some(&open) {
            out.push_units(&units[brace..brace + 2]);
            cursor = brace + 2;
            continue;
        }

        let Some(end) = template.find_unit_from(close, brace + 1) else {
            // No closing brace anywhere: the rest is literal
            out.push_units(&units[brace..]);
            return Ok(out);
        };

        let index = parse_index::<W>(&units[brace + 1..end])
            .ok_or(FormatError::InvalidIndex { offset: brace })?;
        let arg = rendered
            .get(index)
            .ok_or(FormatError::IndexOutOfRange {
                index,
                len: args.len(),
            })?;

        for c in arg.chars() {
            out.push(c);
        }
        cursor = end + 1;
    }

    out.push_units(&units[cursor..]);
    Ok(out)
}

/// Parses a marker body as a decimal index: non-empty, ASCII digits only.
fn parse_index<W: Width>(units: &[W::Unit]) -> Option<usize> {
    if units.is_empty() {
        return None;
    }
    let mut index: usize = 0;
    for &unit in units {
        let value = unit.as_u32();
        if !(0x30..=0x39).contains(&value) {
            return None;
        }
        index = index
            .checked_mul(10)?
            .checked_add((value - 0x30) as usize)?;
    }
    Some(index)
}
