//! The two operation kinds exercised by the generator.
//!
//! Both operate on a string indexed in UTF-16 units (see [`crate::units`]):
//!
//! - Replace: "at `offset`, the text `before` becomes `after`". An empty
//!   `before` is an insertion, an empty `after` is a deletion.
//! - Move: "the `count` units at `offset` shift `distance` units", left
//!   when negative and right when positive. The shifted range never
//!   overlaps the text it jumps over.
//!
//! An absent operation is a no-op; sequences of operations are plain
//! slices and an empty slice changes nothing.

use crate::error::{Error, Result};
use crate::units;

/// Replace `before` at `offset` with `after`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Replace {
    pub offset: usize,
    pub before: String,
    pub after: String,
}

/// Shift the units `offset..offset + count` by `distance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub offset: usize,
    pub count: usize,
    pub distance: isize,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Replace(Replace),
    Move(Move),
}

impl Replace {
    pub fn new(offset: usize, before: impl Into<String>, after: impl Into<String>) -> Replace {
        return Replace {
            offset,
            before: before.into(),
            after: after.into(),
        };
    }

    /// Offset just past the replaced text, in units.
    pub fn end(&self) -> usize {
        return self.offset + units::len(&self.before);
    }

    /// Split `input` around the replaced range, checking that the range
    /// holds exactly `before`.
    pub(crate) fn split<'a>(&self, input: &'a str) -> Result<(&'a str, &'a str, &'a str)> {
        let end = self.end();
        let found = units::slice(input, self.offset, end)?;
        if found != self.before {
            return Err(Error::BeforeMismatch {
                offset: self.offset,
                expected: self.before.clone(),
                found: found.to_string(),
            });
        }
        let (left, rest) = units::split_at(input, self.offset)?;
        let right = &rest[found.len()..];
        return Ok((left, found, right));
    }

    pub fn apply(&self, input: &str) -> Result<String> {
        let (left, _, right) = self.split(input)?;
        return Ok([left, self.after.as_str(), right].concat());
    }
}

/// The pieces of a string a move touches, in input order. For a left
/// move `lead` is the text the range jumps over, for a right move it is
/// `trail`; the other one is empty.
pub(crate) struct MoveParts<'a> {
    pub prefix: &'a str,
    pub lead: &'a str,
    pub mid: &'a str,
    pub trail: &'a str,
    pub suffix: &'a str,
}

impl Move {
    pub fn new(offset: usize, count: usize, distance: isize) -> Move {
        return Move {
            offset,
            count,
            distance,
        };
    }

    pub fn end(&self) -> usize {
        return self.offset + self.count;
    }

    pub(crate) fn split<'a>(&self, input: &'a str) -> Result<MoveParts<'a>> {
        let len = units::len(input);
        let end = self.end();
        let reach = self.distance.unsigned_abs();
        let (start, stop) = if self.distance < 0 {
            (self.offset.checked_sub(reach), Some(end))
        } else {
            (Some(self.offset), end.checked_add(reach))
        };
        let (Some(start), Some(stop)) = (start, stop) else {
            return Err(Error::OutOfBounds {
                start: self.offset,
                end,
                len,
            });
        };
        if stop > len {
            return Err(Error::OutOfBounds { start, end: stop, len });
        }

        let prefix = units::slice(input, 0, start)?;
        let suffix = units::slice(input, stop, len)?;
        let mid = units::slice(input, self.offset, end)?;
        let (lead, trail) = if self.distance < 0 {
            (units::slice(input, start, self.offset)?, "")
        } else {
            ("", units::slice(input, end, stop)?)
        };
        return Ok(MoveParts {
            prefix,
            lead,
            mid,
            trail,
            suffix,
        });
    }

    pub fn apply(&self, input: &str) -> Result<String> {
        let p = self.split(input)?;
        if self.distance < 0 {
            return Ok([p.prefix, p.mid, p.lead, p.suffix].concat());
        }
        return Ok([p.prefix, p.trail, p.mid, p.suffix].concat());
    }
}

impl Op {
    pub fn apply(&self, input: &str) -> Result<String> {
        return match self {
            Op::Replace(replace) => replace.apply(input),
            Op::Move(m) => m.apply(input),
        };
    }
}

impl From<Replace> for Op {
    fn from(replace: Replace) -> Op {
        return Op::Replace(replace);
    }
}

impl From<Move> for Op {
    fn from(m: Move) -> Op {
        return Op::Move(m);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_in_middle() {
        let op = Replace::new(2, "cd", "xyz");
        assert_eq!(op.apply("abcdefg").unwrap(), "abxyzefg");
    }

    #[test]
    fn replace_insert_and_delete() {
        assert_eq!(Replace::new(0, "", "x").apply("ab").unwrap(), "xab");
        assert_eq!(Replace::new(2, "", "x").apply("ab").unwrap(), "abx");
        assert_eq!(Replace::new(0, "ab", "").apply("ab").unwrap(), "");
    }

    #[test]
    fn replace_checks_before() {
        let err = Replace::new(1, "c", "x").apply("abc").unwrap_err();
        assert!(matches!(err, Error::BeforeMismatch { offset: 1, .. }));
    }

    #[test]
    fn replace_counts_units() {
        let op = Replace::new(2, "b", "c");
        assert_eq!(op.apply("𝐀b").unwrap(), "𝐀c");
    }

    #[test]
    fn move_left() {
        // "de" jumps over "bc"
        let op = Move::new(3, 2, -2);
        assert_eq!(op.apply("abcdefg").unwrap(), "adebcfg");
    }

    #[test]
    fn move_right() {
        let op = Move::new(1, 2, 3);
        assert_eq!(op.apply("abcdefg").unwrap(), "adefbcg");
    }

    #[test]
    fn move_zero_distance_and_zero_count() {
        assert_eq!(Move::new(2, 3, 0).apply("abcdefg").unwrap(), "abcdefg");
        assert_eq!(Move::new(2, 0, 3).apply("abcdefg").unwrap(), "abcdefg");
    }

    #[test]
    fn move_out_of_bounds() {
        assert!(Move::new(1, 1, -2).apply("abc").is_err());
        assert!(Move::new(1, 1, 2).apply("abc").is_err());
        assert!(Move::new(1, 1, 1).apply("abc").is_ok());
    }
}
