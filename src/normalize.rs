//! Structural normalization of a list of strings.
//!
//! Two lists are isomorphic when one turns into the other by consistently
//! substituting substrings. Normalization maps every list in an
//! isomorphism class to the same representative:
//!
//! 1. Split every string on the punctuation and break the pieces down
//!    until none of them contains another. What remains are the maximal
//!    runs of text that always travel together.
//! 2. Order those segments by first occurrence: earlier strings first,
//!    then earlier offsets within a string.
//! 3. Give the n-th segment the n-th alphabet symbol and rewrite each
//!    string with the symbols. Punctuation is copied through untouched.
//!
//! ```text
//! ["he[lo:ro]", "[he:bo]lo"]  =>  ["a[b:c]", "[a:d]b"]
//! ```
//!
//! The procedure assumes no string repeats a character. Lists that do
//! still normalize deterministically, but the result carries no meaning.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::error::{Error, Result};

/// A run of text that always appears whole, and the symbol standing in
/// for it.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Segment<'a> {
    content: String,
    replacement: &'a str,
    /// The string and byte offset of the first occurrence.
    index: usize,
    offset: usize,
}

/// Split `symbols` into single-character alphabet entries.
pub fn alphabet(symbols: &str) -> Vec<String> {
    return symbols.chars().map(String::from).collect();
}

/// Reject an alphabet that repeats a symbol. Two segments sharing a
/// symbol would make unrelated lists normalize identically.
pub fn check_alphabet(alphabet: &[String]) -> Result<()> {
    if alphabet.is_empty() {
        return Err(Error::Config("alphabet is empty".to_string()));
    }
    let mut symbols = FxHashSet::default();
    if let Some(repeated) = alphabet.iter().find(|s| !symbols.insert(s.as_str())) {
        return Err(Error::Config(format!("alphabet repeats the symbol {repeated:?}")));
    }
    return Ok(());
}

/// Normalize `strings`, splitting on any character of `punctuation` and
/// relabeling segments with `alphabet`.
///
/// Fails with [`Error::AlphabetExhausted`] when there are more segments
/// than symbols.
pub fn normalize<S: AsRef<str>>(
    strings: &[S],
    punctuation: &str,
    alphabet: &[String],
) -> Result<Vec<String>> {
    let mut segments: Vec<Segment> = common_segments(strings, punctuation)
        .into_iter()
        .map(|content| {
            let (index, offset) = first_occurrence(strings, &content);
            Segment {
                content,
                replacement: "",
                index,
                offset,
            }
        })
        .collect();

    if segments.len() > alphabet.len() {
        return Err(Error::AlphabetExhausted {
            available: alphabet.len(),
            needed: segments.len(),
        });
    }

    segments.sort_by_key(|s| (s.index, s.offset));
    for (segment, symbol) in segments.iter_mut().zip(alphabet) {
        segment.replacement = symbol.as_str();
    }

    return Ok(strings
        .iter()
        .map(|s| substitute(s.as_ref(), &segments))
        .collect());
}

/// [`normalize`] for a fixed number of strings.
pub fn normalize_array<const N: usize>(
    strings: [&str; N],
    punctuation: &str,
    alphabet: &[String],
) -> Result<[String; N]> {
    let mut out = normalize(&strings, punctuation, alphabet)?.into_iter();
    return Ok(std::array::from_fn(|_| out.next().unwrap_or_default()));
}

fn first_occurrence<S: AsRef<str>>(strings: &[S], content: &str) -> (usize, usize) {
    return strings
        .iter()
        .enumerate()
        .find_map(|(index, s)| s.as_ref().find(content).map(|offset| (index, offset)))
        .unwrap_or((usize::MAX, usize::MAX));
}

/// Break the punctuation-delimited parts of `strings` into segments none
/// of which contains another.
///
/// Each string's parts go on a worklist, last part on top. A part inside
/// a known segment splits that segment around it; a part around a known
/// segment is split around it instead. The pieces go back on the
/// worklist, which drains because every split leaves shorter pieces.
/// Parts that merely overlap are kept as they are.
fn common_segments<S: AsRef<str>>(strings: &[S], punctuation: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();

    for s in strings {
        let mut work: SmallVec<[String; 8]> = s
            .as_ref()
            .split(|c: char| punctuation.contains(c))
            .map(String::from)
            .collect();

        while let Some(part) = work.pop() {
            if part.is_empty() || seen.contains(&part) {
                continue;
            }

            let nested = seen
                .iter()
                .position(|key| key.contains(part.as_str()) || part.contains(key.as_str()));
            let Some(i) = nested else {
                seen.push(part);
                continue;
            };

            if seen[i].contains(part.as_str()) {
                let key = seen.remove(i);
                work.extend(key.split(part.as_str()).map(String::from));
                work.push(part);
            } else {
                work.extend(part.split(seen[i].as_str()).map(String::from));
            }
        }
    }

    return seen;
}

/// Rewrite `s` left to right, replacing the first segment that matches
/// at each position and copying the character through otherwise.
fn substitute(s: &str, segments: &[Segment]) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(c) = rest.chars().next() {
        match segments.iter().find(|seg| rest.starts_with(seg.content.as_str())) {
            Some(seg) => {
                out.push_str(seg.replacement);
                rest = &rest[seg.content.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    return out;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Vec<String> {
        return alphabet("abcdefghijklmnop");
    }

    #[test]
    fn first_occurrence_order() {
        let out = normalize(&["he[lo:ro]", "[he:bo]lo"], ":[]", &letters()).unwrap();
        assert_eq!(out, vec!["a[b:c]", "[a:d]b"]);
    }

    #[test]
    fn splits_shared_content() {
        let out = normalize(&["hea:rt", "he:pam:rt"], ":[]", &letters()).unwrap();
        assert_eq!(out, vec!["ab:c", "a:dbe:c"]);
    }

    #[test]
    fn isomorphic_lists_normalize_identically() {
        let a = normalize(&["abcdefg", "ab(cd=xyz)efg"], "(=)", &letters()).unwrap();
        let b = normalize(&["pqrstuv", "pq(rs=XYZ)tuv"], "(=)", &letters()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, vec!["abc", "a(b=d)c"]);
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize(&["abcdefg", "a=bc(de)fg", "ab(cd=)efg"], "(=)", &letters()).unwrap();
        let twice = normalize(&once, "(=)", &letters()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn partial_overlap_is_not_split() {
        let out = normalize(&["abc", "bcd"], "", &letters()).unwrap();
        assert_eq!(out, vec!["a", "b"]);
    }

    #[test]
    fn contained_part_splits_the_segment() {
        let out = normalize(&["abcde", "b(cd=)e"], "(=)", &letters()).unwrap();
        assert_eq!(out, vec!["abcd", "b(c=)d"]);
    }

    #[test]
    fn symbols_may_be_multi_unit() {
        let bold = alphabet("𝐀𝐁𝐂𝐃");
        let out = normalize(&["abcd", "ab(=)cd"], "(=)", &bold).unwrap();
        assert_eq!(out, vec!["𝐀𝐁", "𝐀(=)𝐁"]);
    }

    #[test]
    fn empty_strings_stay_empty() {
        let out = normalize(&["", "(=)"], "(=)", &letters()).unwrap();
        assert_eq!(out, vec!["", "(=)"]);
    }

    #[test]
    fn too_few_symbols() {
        let err = normalize(&["a:b:c"], ":", &alphabet("xy")).unwrap_err();
        assert!(matches!(err, Error::AlphabetExhausted { available: 2, needed: 3 }));
    }

    #[test]
    fn alphabet_symbols_must_be_distinct() {
        check_alphabet(&letters()).unwrap();
        let err = check_alphabet(&alphabet("abca")).unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("\"a\"")), "{err}");
        assert!(matches!(check_alphabet(&[]), Err(Error::Config(_))));
    }

    #[test]
    fn repeated_characters_are_deterministic() {
        let first = normalize(&["abab", "ba:ab"], ":", &letters()).unwrap();
        let second = normalize(&["abab", "ba:ab"], ":", &letters()).unwrap();
        assert_eq!(first, second);
    }
}
