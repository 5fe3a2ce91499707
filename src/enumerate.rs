//! Exhaustive enumeration of operations and operation pairs.
//!
//! For a subject string of n characters there are (n+1)(n+2)/2 ranges.
//! Every range paired with every insert value gives the replaces; every
//! range paired with every destination that does not land strictly
//! inside it gives the moves. Pairs are the cross product of two such
//! lists, and [`Enumerator::unique_pairs`] keeps one pair per
//! isomorphism class.
//!
//! Enumeration order is fixed. The first pair found in each class is the
//! one kept, and its normalized text is what ends up in fixture files,
//! so changing the order changes the fixtures.

use std::iter;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::compact::{Compact, Notation};
use crate::error::{Error, Result};
use crate::normalize::{check_alphabet, normalize_array};
use crate::op::{Move, Op, Replace};
use crate::units;

/// Which operation kinds appear on the left and right of a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairKind {
    /// Replace on both sides.
    Replaces,
    /// Move on both sides.
    Moves,
    /// Replace on the left, move on the right.
    ReplaceMove,
}

/// A normalized subject string with a normalized operation on each side.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Triple {
    pub input: String,
    pub left: String,
    pub right: String,
}

pub struct Enumerator {
    input: String,
    inserts: Vec<String>,
    compact: Compact,
}

impl Enumerator {
    /// The subject and inserts must not contain the notation's reserved
    /// characters; enumeration fails with [`Error::Config`] if they do.
    pub fn new<S: Into<String>>(
        input: impl Into<String>,
        inserts: impl IntoIterator<Item = S>,
        notation: Notation,
    ) -> Enumerator {
        return Enumerator {
            input: input.into(),
            inserts: inserts.into_iter().map(Into::into).collect(),
            compact: Compact::new(notation),
        };
    }

    pub fn input(&self) -> &str {
        return &self.input;
    }

    pub fn compact(&self) -> &Compact {
        return &self.compact;
    }

    fn check_reserved(&self) -> Result<()> {
        let notation = self.compact.notation;
        for text in iter::once(&self.input).chain(&self.inserts) {
            if text.chars().any(|c| notation.is_special(c)) {
                return Err(Error::Config(format!(
                    "{text:?} contains one of the reserved characters {:?}",
                    notation.specials()
                )));
            }
        }
        return Ok(());
    }

    /// Unit offsets of the character boundaries of the input, so no
    /// enumerated range cuts a surrogate pair.
    fn boundaries(&self) -> Vec<usize> {
        let mut out = vec![0];
        let mut offset = 0;
        for c in self.input.chars() {
            offset += c.len_utf16();
            out.push(offset);
        }
        return out;
    }

    /// Every replace over the input, in compact form.
    pub fn replaces(&self) -> Result<Vec<String>> {
        self.check_reserved()?;
        let bounds = self.boundaries();
        let mut out = Vec::new();
        for (i, &offset) in bounds.iter().enumerate() {
            for &end in &bounds[i..] {
                let before = units::slice(&self.input, offset, end)?;
                for insert in &self.inserts {
                    let op = Op::Replace(Replace::new(offset, before, insert.as_str()));
                    out.push(self.compact.encode(&self.input, &op)?);
                }
            }
        }
        return Ok(out);
    }

    /// Every move over the input, in compact form.
    ///
    /// A destination equal to either edge of the range is a zero-distance
    /// move, so the same move can be produced twice; the duplicates fold
    /// together during deduplication.
    pub fn moves(&self) -> Result<Vec<String>> {
        self.check_reserved()?;
        let bounds = self.boundaries();
        let mut out = Vec::new();
        for (i, &offset) in bounds.iter().enumerate() {
            for &end in &bounds[i..] {
                for &dest in &bounds {
                    let distance = if dest <= offset {
                        dest as isize - offset as isize
                    } else if dest >= end {
                        (dest - end) as isize
                    } else {
                        continue;
                    };
                    let op = Op::Move(Move::new(offset, end - offset, distance));
                    out.push(self.compact.encode(&self.input, &op)?);
                }
            }
        }
        return Ok(out);
    }

    /// The left and right operation lists for `kind`.
    pub fn sides(&self, kind: PairKind) -> Result<(Vec<String>, Vec<String>)> {
        return Ok(match kind {
            PairKind::Replaces => {
                let replaces = self.replaces()?;
                (replaces.clone(), replaces)
            }
            PairKind::Moves => {
                let moves = self.moves()?;
                (moves.clone(), moves)
            }
            PairKind::ReplaceMove => (self.replaces()?, self.moves()?),
        });
    }

    /// One normalized pair per isomorphism class, in order of discovery.
    pub fn unique_pairs(&self, kind: PairKind, alphabet: &[String]) -> Result<Vec<Triple>> {
        check_alphabet(alphabet)?;
        let specials = self.compact.notation.specials();
        let (lefts, rights) = self.sides(kind)?;

        let mut seen: FxHashSet<Triple> = FxHashSet::default();
        let mut unique = Vec::new();
        for left in &lefts {
            for right in &rights {
                let [input, left, right] =
                    normalize_array([self.input.as_str(), left.as_str(), right.as_str()], &specials, alphabet)?;
                let triple = Triple { input, left, right };
                if seen.contains(&triple) {
                    continue;
                }
                tracing::trace!(left = %triple.left, right = %triple.right, "new pair");
                seen.insert(triple.clone());
                unique.push(triple);
            }
        }

        tracing::debug!(
            ?kind,
            input = %self.input,
            candidates = lefts.len() * rights.len(),
            unique = unique.len(),
            "enumerated pairs"
        );
        return Ok(unique);
    }
}
