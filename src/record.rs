//! Fixture records and the file that holds them.
//!
//! A record is a JSON array of six entries:
//!
//! ```text
//! [input, output, [left], [right], [left continuation...], [right continuation...]]
//! ```
//!
//! Every operation is in compact form, each written against the text the
//! operations before it on the same side produce. A fixture file wraps
//! the records as `{"format": "compact", "test": [...]}`.

use std::io::Write;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::compact::Compact;
use crate::error::{Divergence, Error, Result};
use crate::oracle::Apply;

pub const FORMAT: &str = "compact";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub input: String,
    pub output: String,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub left_merged: Vec<String>,
    pub right_merged: Vec<String>,
}

type RecordTuple = (String, String, Vec<String>, Vec<String>, Vec<String>, Vec<String>);

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        return (
            &self.input,
            &self.output,
            &self.left,
            &self.right,
            &self.left_merged,
            &self.right_merged,
        )
            .serialize(serializer);
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (input, output, left, right, left_merged, right_merged) =
            RecordTuple::deserialize(deserializer)?;
        return Ok(Record {
            input,
            output,
            left,
            right,
            left_merged,
            right_merged,
        });
    }
}

impl Record {
    /// Replay one side's texts from `input`, checking that each text
    /// starts from the state the previous ones produced.
    fn replay_side<'a>(
        &self,
        texts: impl Iterator<Item = &'a String>,
        compact: &Compact,
        apply: &impl Apply,
    ) -> Result<String> {
        let mut current = self.input.clone();
        for text in texts {
            let Some((state, op)) = compact.decode_change(text)? else {
                continue;
            };
            if state != current {
                return Err(Error::StateMismatch {
                    text: text.clone(),
                    expected: current,
                    found: state,
                });
            }
            current = apply.apply(&current, std::slice::from_ref(&op))?;
        }
        return Ok(current);
    }

    /// Replay both sides and check that they reach `output`.
    pub fn replay(&self, compact: &Compact, apply: &impl Apply) -> Result<()> {
        let left = self.left.iter().chain(&self.left_merged);
        let right = self.right.iter().chain(&self.right_merged);
        let output_left = self.replay_side(left, compact, apply)?;
        let output_right = self.replay_side(right, compact, apply)?;
        if output_left == self.output && output_right == self.output {
            return Ok(());
        }
        return Err(Error::Divergence(Box::new(Divergence {
            input: self.input.clone(),
            left: self.left.join(" "),
            right: self.right.join(" "),
            encoded_left: self.left_merged.clone(),
            encoded_right: self.right_merged.clone(),
            output_left,
            output_right,
        })));
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub format: String,
    pub test: Vec<Record>,
}

impl Fixture {
    pub fn new(test: Vec<Record>) -> Fixture {
        return Fixture {
            format: FORMAT.to_string(),
            test,
        };
    }

    pub fn from_json(json: &str) -> Result<Fixture> {
        let fixture: Fixture = serde_json::from_str(json)?;
        if fixture.format != FORMAT {
            return Err(Error::Config(format!("unsupported fixture format {:?}", fixture.format)));
        }
        return Ok(fixture);
    }

    /// Write the fixture with one record per line.
    pub fn write_to(&self, mut out: impl Write) -> Result<()> {
        writeln!(out, "{{")?;
        writeln!(out, "\t\"format\": {},", serde_json::to_string(&self.format)?)?;
        writeln!(out, "\t\"test\": [")?;
        for (i, record) in self.test.iter().enumerate() {
            let sep = if i + 1 < self.test.len() { "," } else { "" };
            writeln!(out, "\t\t{}{}", serde_json::to_string(record)?, sep)?;
        }
        writeln!(out, "\t]")?;
        writeln!(out, "}}")?;
        return Ok(());
    }

    /// Replay every record.
    pub fn verify(&self, compact: &Compact, apply: &impl Apply) -> Result<()> {
        for record in &self.test {
            record.replay(compact, apply)?;
        }
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::Transformer;

    fn record() -> Record {
        return Record {
            input: "abc".to_string(),
            output: "xbcy".to_string(),
            left: vec!["(a=x)bc".to_string()],
            right: vec!["abc(=y)".to_string()],
            left_merged: vec!["xbc(=y)".to_string()],
            right_merged: vec!["(a=x)bcy".to_string()],
        };
    }

    #[test]
    fn record_is_a_json_array() {
        let json = serde_json::to_string(&record()).unwrap();
        assert_eq!(
            json,
            r#"["abc","xbcy",["(a=x)bc"],["abc(=y)"],["xbc(=y)"],["(a=x)bcy"]]"#
        );
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record());
    }

    #[test]
    fn fixture_file_layout() {
        let mut out = Vec::new();
        Fixture::new(vec![record(), record()]).write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("{\n\t\"format\": \"compact\",\n\t\"test\": [\n\t\t[\"abc\""));
        assert_eq!(text.lines().count(), 7);

        let parsed = Fixture::from_json(&text).unwrap();
        assert_eq!(parsed.test.len(), 2);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = Fixture::from_json(r#"{"format": "verbose", "test": []}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn replay_accepts_converging_record() {
        record().replay(&Compact::default(), &Transformer).unwrap();
    }

    #[test]
    fn replay_rejects_wrong_output() {
        let mut bad = record();
        bad.output = "xbc".to_string();
        let err = bad.replay(&Compact::default(), &Transformer).unwrap_err();
        assert!(matches!(err, Error::Divergence(_)));
    }

    #[test]
    fn replay_rejects_broken_chain() {
        let mut bad = record();
        bad.left_merged = vec!["abc(=y)".to_string()];
        let err = bad.replay(&Compact::default(), &Transformer).unwrap_err();
        assert!(matches!(err, Error::StateMismatch { .. }));
    }
}
