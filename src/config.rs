//! Generation settings and the built-in presets.
//!
//! A config file is JSON; every field is optional and falls back to the
//! `splices` preset:
//!
//! ```json
//! {
//!     "input": "abcdefg",
//!     "inserts": ["", "xyz"],
//!     "alphabet": "abcdefghijklmnop",
//!     "notation": { "open": "(", "close": ")", "separator": "=" },
//!     "kind": "replace_move"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compact::Notation;
use crate::enumerate::{Enumerator, PairKind};
use crate::error::{Error, Result};
use crate::generate::Generator;
use crate::normalize;

/// Mathematical bold capitals. Every symbol is two UTF-16 units, so
/// fixtures written with them exercise unit arithmetic.
pub const BOLD_ALPHABET: &str = "𝐀𝐁𝐂𝐃𝐄𝐅𝐆𝐇𝐈𝐉𝐊𝐋𝐌𝐍𝐎𝐏";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Subject string. No character may repeat.
    pub input: String,
    /// Texts a replace may insert.
    pub inserts: Vec<String>,
    /// Normalization symbols, one per character. No symbol may repeat.
    pub alphabet: String,
    pub notation: Notation,
    pub kind: PairKind,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        return GeneratorConfig::splices();
    }
}

impl GeneratorConfig {
    pub fn splices() -> GeneratorConfig {
        return GeneratorConfig {
            input: "abcdefg".to_string(),
            inserts: vec![String::new(), "xyz".to_string(), "XYZ".to_string()],
            alphabet: BOLD_ALPHABET.to_string(),
            notation: Notation::COMPACT,
            kind: PairKind::Replaces,
        };
    }

    pub fn splicemoves() -> GeneratorConfig {
        return GeneratorConfig {
            input: "abcdefgh".to_string(),
            inserts: vec![String::new(), "xyz".to_string()],
            kind: PairKind::ReplaceMove,
            ..GeneratorConfig::splices()
        };
    }

    pub fn moves() -> GeneratorConfig {
        return GeneratorConfig {
            inserts: Vec::new(),
            kind: PairKind::Moves,
            ..GeneratorConfig::splices()
        };
    }

    pub fn preset(name: &str) -> Option<GeneratorConfig> {
        return match name {
            "splices" => Some(GeneratorConfig::splices()),
            "splicemoves" => Some(GeneratorConfig::splicemoves()),
            "moves" => Some(GeneratorConfig::moves()),
            _ => None,
        };
    }

    pub fn from_json(json: &str) -> Result<GeneratorConfig> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        return Ok(config);
    }

    pub fn load(path: impl AsRef<Path>) -> Result<GeneratorConfig> {
        let json = fs::read_to_string(path)?;
        return GeneratorConfig::from_json(&json);
    }

    /// Reject settings the compact form cannot represent unambiguously.
    pub fn validate(&self) -> Result<()> {
        let n = &self.notation;
        if n.open == n.close || n.open == n.separator || n.close == n.separator {
            return Err(Error::Config("notation characters must be distinct".to_string()));
        }
        let mut texts = vec![self.input.as_str(), self.alphabet.as_str()];
        texts.extend(self.inserts.iter().map(String::as_str));
        if let Some(text) = texts.into_iter().find(|t| t.chars().any(|c| n.is_special(c))) {
            return Err(Error::Config(format!(
                "{text:?} contains one of the reserved characters {:?}",
                n.specials()
            )));
        }
        normalize::check_alphabet(&self.alphabet())?;
        return Ok(());
    }

    pub fn alphabet(&self) -> Vec<String> {
        return normalize::alphabet(&self.alphabet);
    }

    pub fn enumerator(&self) -> Enumerator {
        return Enumerator::new(self.input.as_str(), self.inserts.iter().cloned(), self.notation);
    }

    pub fn generator(&self) -> Result<Generator> {
        self.validate()?;
        return Ok(Generator::new(self.enumerator(), self.alphabet()));
    }
}
