//! The compact form: an operation written into its subject string.
//!
//! A replace wraps the replaced text and its replacement in brackets,
//! separated by the notation's separator:
//!
//! ```text
//! ab(cd=xyz)efg      offset 2, "cd" becomes "xyz"
//! ab(=xyz)cdefg      insertion at 2
//! ab(cd=)efg         deletion at 2
//! ```
//!
//! A move brackets the span being moved and marks the far edge of the
//! text it jumps over with the separator:
//!
//! ```text
//! a=bc(de)fg         "de" moves left by 2
//! a(bc)def=g         "bc" moves right by 3
//! ab(cde)=fg         distance 0
//! ```
//!
//! The bracket always sits where the span is before the move. Offsets
//! are measured in UTF-16 units. There is no escaping, so subject text
//! must never contain the notation's reserved characters.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::op::{Move, Op, Replace};
use crate::oracle::Apply;
use crate::units;

/// The reserved characters of a compact string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Notation {
    pub open: char,
    pub close: char,
    pub separator: char,
}

impl Notation {
    /// `(before=after)`, used by fixture files.
    pub const COMPACT: Notation = Notation {
        open: '(',
        close: ')',
        separator: '=',
    };

    /// `[before:after]`
    pub const BRACKETED: Notation = Notation {
        open: '[',
        close: ']',
        separator: ':',
    };

    /// The reserved characters as one string, suitable as normalization
    /// punctuation.
    pub fn specials(&self) -> String {
        return [self.open, self.separator, self.close].iter().collect();
    }

    pub fn is_special(&self, c: char) -> bool {
        return c == self.open || c == self.close || c == self.separator;
    }
}

impl Default for Notation {
    fn default() -> Self {
        return Notation::COMPACT;
    }
}

/// Encoder and decoder for one [`Notation`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Compact {
    pub notation: Notation,
}

impl Compact {
    pub fn new(notation: Notation) -> Compact {
        return Compact { notation };
    }

    /// Write `op` into `input`.
    ///
    /// The replaced text of a [`Replace`] is read back out of `input`, so
    /// the result always decodes to `input` again; a `before` that does
    /// not match the input is an error.
    pub fn encode(&self, input: &str, op: &Op) -> Result<String> {
        let Notation {
            open,
            close,
            separator,
        } = self.notation;
        let mut out = String::with_capacity(input.len() + 3);
        match op {
            Op::Replace(replace) => {
                let (left, before, right) = replace.split(input)?;
                out.push_str(left);
                out.push(open);
                out.push_str(before);
                out.push(separator);
                out.push_str(&replace.after);
                out.push(close);
                out.push_str(right);
            }
            Op::Move(m) => {
                let parts = m.split(input)?;
                out.push_str(parts.prefix);
                if m.distance < 0 {
                    out.push(separator);
                    out.push_str(parts.lead);
                }
                out.push(open);
                out.push_str(parts.mid);
                out.push(close);
                if m.distance >= 0 {
                    out.push_str(parts.trail);
                    out.push(separator);
                }
                out.push_str(parts.suffix);
            }
        }
        return Ok(out);
    }

    /// Like [`Compact::encode`], with the empty string standing for no
    /// operation.
    pub fn encode_change(&self, input: &str, op: Option<&Op>) -> Result<String> {
        return match op {
            Some(op) => self.encode(input, op),
            None => Ok(String::new()),
        };
    }

    /// Encode a sequence, each operation against the output of the ones
    /// before it.
    pub fn encode_all(&self, input: &str, ops: &[Op], apply: &impl Apply) -> Result<Vec<String>> {
        let mut current = input.to_string();
        let mut out = Vec::with_capacity(ops.len());
        for op in ops {
            out.push(self.encode(&current, op)?);
            current = apply.apply(&current, std::slice::from_ref(op))?;
        }
        return Ok(out);
    }

    /// Recover the subject string and the operation from compact text.
    pub fn decode(&self, text: &str) -> Result<(String, Op)> {
        let Notation {
            open,
            close,
            separator,
        } = self.notation;
        let malformed = |reason| Error::Malformed {
            text: text.to_string(),
            reason,
        };

        let (Some(l), Some(r)) = (text.find(open), text.rfind(close)) else {
            return Err(malformed("missing brackets"));
        };
        if r < l {
            return Err(malformed("closing bracket precedes opening bracket"));
        }
        let left = &text[..l];
        let mid = &text[l + open.len_utf8()..r];
        let right = &text[r + close.len_utf8()..];

        if let Some((before, after)) = mid.split_once(separator) {
            let replace = Replace::new(units::len(left), before, after);
            return Ok(([left, before, right].concat(), Op::Replace(replace)));
        }

        let count = units::len(mid);
        return match (left.split_once(separator), right.split_once(separator)) {
            (Some((l1, l2)), None) => {
                if l2.contains(separator) {
                    return Err(malformed("repeated separator"));
                }
                let distance = units::len(l2) as isize;
                let m = Move::new(units::len(l1) + units::len(l2), count, -distance);
                Ok(([l1, l2, mid, right].concat(), Op::Move(m)))
            }
            (None, Some((r1, r2))) => {
                if r2.contains(separator) {
                    return Err(malformed("repeated separator"));
                }
                let m = Move::new(units::len(left), count, units::len(r1) as isize);
                Ok(([left, mid, r1, r2].concat(), Op::Move(m)))
            }
            (Some(_), Some(_)) => Err(malformed("separator on both sides of the bracket")),
            (None, None) => Err(malformed("no separator")),
        };
    }

    /// Like [`Compact::decode`], with the empty string decoding to no
    /// operation.
    pub fn decode_change(&self, text: &str) -> Result<Option<(String, Op)>> {
        if text.is_empty() {
            return Ok(None);
        }
        return self.decode(text).map(Some);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact() -> Compact {
        return Compact::default();
    }

    #[test]
    fn encode_replace() {
        let op = Op::Replace(Replace::new(2, "cd", "xyz"));
        assert_eq!(compact().encode("abcdefg", &op).unwrap(), "ab(cd=xyz)efg");
    }

    #[test]
    fn encode_replace_bracketed() {
        let op = Op::Replace(Replace::new(2, "cd", "xyz"));
        let text = Compact::new(Notation::BRACKETED).encode("abcdefg", &op).unwrap();
        assert_eq!(text, "ab[cd:xyz]efg");
    }

    #[test]
    fn encode_replace_rejects_wrong_before() {
        let op = Op::Replace(Replace::new(2, "xx", "y"));
        assert!(matches!(
            compact().encode("abcdefg", &op),
            Err(Error::BeforeMismatch { .. })
        ));
    }

    #[test]
    fn encode_moves() {
        let c = compact();
        assert_eq!(c.encode("abcdefg", &Move::new(3, 2, -2).into()).unwrap(), "a=bc(de)fg");
        assert_eq!(c.encode("abcdefg", &Move::new(1, 2, 3).into()).unwrap(), "a(bc)def=g");
        assert_eq!(c.encode("abcdefg", &Move::new(2, 3, 0).into()).unwrap(), "ab(cde)=fg");
        assert_eq!(c.encode("abc", &Move::new(3, 0, -3).into()).unwrap(), "=abc()");
    }

    #[test]
    fn decode_replace() {
        let (input, op) = compact().decode("ab(cd=xyz)efg").unwrap();
        assert_eq!(input, "abcdefg");
        assert_eq!(op, Op::Replace(Replace::new(2, "cd", "xyz")));
    }

    #[test]
    fn decode_moves() {
        let (input, op) = compact().decode("a=bc(de)fg").unwrap();
        assert_eq!(input, "abcdefg");
        assert_eq!(op, Op::Move(Move::new(3, 2, -2)));

        let (input, op) = compact().decode("a(bc)def=g").unwrap();
        assert_eq!(input, "abcdefg");
        assert_eq!(op, Op::Move(Move::new(1, 2, 3)));

        let (_, op) = compact().decode("ab(cde)=fg").unwrap();
        assert_eq!(op, Op::Move(Move::new(2, 3, 0)));
    }

    #[test]
    fn decode_measures_units() {
        let (input, op) = compact().decode("𝐀(𝐁=x)").unwrap();
        assert_eq!(input, "𝐀𝐁");
        assert_eq!(op, Op::Replace(Replace::new(2, "𝐁", "x")));

        let (_, op) = compact().decode("=𝐀(𝐁)").unwrap();
        assert_eq!(op, Op::Move(Move::new(2, 2, -2)));
    }

    #[test]
    fn decode_malformed() {
        for text in ["abc", "a)b(c", "a(b)c", "a=b(c)d=e", "a=b=(c)d"] {
            let err = compact().decode(text).unwrap_err();
            assert!(matches!(err, Error::Malformed { .. }), "{text}: {err}");
        }
    }

    #[test]
    fn empty_text_is_no_op() {
        assert_eq!(compact().encode_change("abc", None).unwrap(), "");
        assert!(compact().decode_change("").unwrap().is_none());
        assert!(compact().decode_change("(=x)").unwrap().is_some());
    }

    #[test]
    fn boundary_operations_round_trip() {
        let c = compact();
        let input = "abc";
        let ops: Vec<Op> = vec![
            Replace::new(0, "", "x").into(),
            Replace::new(3, "", "x").into(),
            Replace::new(0, "abc", "").into(),
            Replace::new(1, "", "").into(),
            Move::new(0, 0, 0).into(),
            Move::new(3, 0, -3).into(),
            Move::new(0, 3, 0).into(),
        ];
        for op in ops {
            let text = c.encode(input, &op).unwrap();
            let (decoded_input, decoded) = c.decode(&text).unwrap();
            assert_eq!(decoded_input, input, "{text}");
            assert_eq!(decoded, op, "{text}");
        }
    }

    #[test]
    fn specials() {
        assert_eq!(Notation::COMPACT.specials(), "(=)");
        assert_eq!(Notation::BRACKETED.specials(), "[:]");
        assert!(Notation::COMPACT.is_special('='));
        assert!(!Notation::COMPACT.is_special(':'));
    }
}
