//! The merge and apply seams the generator drives.
//!
//! The generator only relies on the contracts below; it never looks at
//! how an implementation reconciles two operations. [`Transformer`] is
//! the implementation the binaries use.

use crate::error::Result;
use crate::op::{Op, Replace};
use crate::units;

/// Executes operation sequences against a string.
pub trait Apply {
    /// Apply `ops` to `input` in order.
    fn apply(&self, input: &str, ops: &[Op]) -> Result<String>;
}

/// Reconciles two concurrent operation sequences.
///
/// For sequences `left` and `right` that both start from `base`, the
/// result `(left', right')` must satisfy
/// `apply(base, left ++ left') == apply(base, right ++ right')`.
pub trait Merge {
    fn merge(&self, base: &str, left: &[Op], right: &[Op]) -> Result<(Vec<Op>, Vec<Op>)>;
}

/// A rebasing merge.
///
/// Each side is reduced to the single minimal [`Replace`] that turns the
/// base into that side's result, so moves are merged as the text they
/// rewrite. Replaces over disjoint ranges both take effect; when both
/// insert at the same point the left insertion comes first. Overlapping
/// replaces delete the union of their ranges and insert the left text
/// followed by the right text. Each continuation is the minimal replace
/// from that side's result to the merged text, or nothing when the two
/// already agree.
#[derive(Clone, Copy, Debug, Default)]
pub struct Transformer;

impl Apply for Transformer {
    fn apply(&self, input: &str, ops: &[Op]) -> Result<String> {
        let mut current = input.to_string();
        for op in ops {
            current = op.apply(&current)?;
        }
        return Ok(current);
    }
}

impl Merge for Transformer {
    fn merge(&self, base: &str, left: &[Op], right: &[Op]) -> Result<(Vec<Op>, Vec<Op>)> {
        let left_state = self.apply(base, left)?;
        let right_state = self.apply(base, right)?;
        let a = diff(base, &left_state)?;
        let b = diff(base, &right_state)?;
        let merged = combine(base, a.as_ref(), b.as_ref())?;

        let left_rest = diff(&left_state, &merged)?.map(Op::Replace);
        let right_rest = diff(&right_state, &merged)?.map(Op::Replace);
        return Ok((left_rest.into_iter().collect(), right_rest.into_iter().collect()));
    }
}

/// The minimal replace turning `from` into `to`, if they differ.
pub fn diff(from: &str, to: &str) -> Result<Option<Replace>> {
    if from == to {
        return Ok(None);
    }
    let prefix = units::common_prefix(from, to);
    let from_rest = units::split_at(from, prefix)?.1;
    let to_rest = units::split_at(to, prefix)?.1;
    let suffix = units::common_suffix(from_rest, to_rest);
    let before = units::slice(from_rest, 0, units::len(from_rest) - suffix)?;
    let after = units::slice(to_rest, 0, units::len(to_rest) - suffix)?;
    return Ok(Some(Replace::new(prefix, before, after)));
}

/// The text produced by applying two concurrent replaces to `base`.
fn combine(base: &str, a: Option<&Replace>, b: Option<&Replace>) -> Result<String> {
    let (a, b) = match (a, b) {
        (None, None) => return Ok(base.to_string()),
        (Some(a), None) => return a.apply(base),
        (None, Some(b)) => return b.apply(base),
        (Some(a), Some(b)) => (a, b),
    };
    let len = units::len(base);

    let (first, second) = if a.end() <= b.offset {
        (a, b)
    } else if b.end() <= a.offset {
        (b, a)
    } else {
        let lo = a.offset.min(b.offset);
        let hi = a.end().max(b.end());
        return Ok([
            units::slice(base, 0, lo)?,
            a.after.as_str(),
            b.after.as_str(),
            units::slice(base, hi, len)?,
        ]
        .concat());
    };

    return Ok([
        units::slice(base, 0, first.offset)?,
        first.after.as_str(),
        units::slice(base, first.end(), second.offset)?,
        second.after.as_str(),
        units::slice(base, second.end(), len)?,
    ]
    .concat());
}
