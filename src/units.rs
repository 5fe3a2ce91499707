//! UTF-16 code-unit arithmetic over `&str`.
//!
//! Offsets, counts and distances in compact form are UTF-16 unit counts,
//! so a character outside the basic multilingual plane occupies two
//! positions. These helpers convert unit positions into byte positions
//! and refuse any position that would cut a surrogate pair in half.

use crate::error::{Error, Result};

/// Length of `s` in UTF-16 code units.
pub fn len(s: &str) -> usize {
    return s.encode_utf16().count();
}

/// Byte index of the unit offset `offset` in `s`.
pub fn byte_index(s: &str, offset: usize) -> Result<usize> {
    let mut units = 0;
    for (index, c) in s.char_indices() {
        if units == offset {
            return Ok(index);
        }
        units += c.len_utf16();
        if units > offset {
            return Err(Error::SplitSurrogate { offset });
        }
    }
    if units == offset {
        return Ok(s.len());
    }
    return Err(Error::OutOfBounds {
        start: offset,
        end: offset,
        len: units,
    });
}

/// The units `start..end` of `s`.
pub fn slice(s: &str, start: usize, end: usize) -> Result<&str> {
    let len = len(s);
    if start > end || end > len {
        return Err(Error::OutOfBounds { start, end, len });
    }
    let from = byte_index(s, start)?;
    let to = byte_index(s, end)?;
    return Ok(&s[from..to]);
}

/// Split `s` into the units before and from `offset`.
pub fn split_at(s: &str, offset: usize) -> Result<(&str, &str)> {
    let index = byte_index(s, offset)?;
    return Ok(s.split_at(index));
}

/// Number of units shared at the start of `a` and `b`.
pub fn common_prefix(a: &str, b: &str) -> usize {
    return a
        .chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf16())
        .sum();
}

/// Number of units shared at the end of `a` and `b`.
pub fn common_suffix(a: &str, b: &str) -> usize {
    return a
        .chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf16())
        .sum();
}
