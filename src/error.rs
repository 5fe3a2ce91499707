//! Errors raised while encoding, normalizing and checking operations.
//!
//! Every variant is fatal for a generation run: a fixture file is only
//! written when the whole run completes without one.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The compact text does not have the delimiter structure of either
    /// operation kind.
    #[error("malformed compact text {text:?}: {reason}")]
    Malformed { text: String, reason: &'static str },

    /// A unit range reaches past the end of its string.
    #[error("unit range {start}..{end} is out of bounds for length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    /// A unit offset lands between the halves of a surrogate pair.
    #[error("unit offset {offset} splits a surrogate pair")]
    SplitSurrogate { offset: usize },

    /// A replace names content that is not present at its offset.
    #[error("replace at {offset} expects {expected:?} but the input has {found:?}")]
    BeforeMismatch {
        offset: usize,
        expected: String,
        found: String,
    },

    #[error("alphabet has {available} symbols but {needed} segments need one each")]
    AlphabetExhausted { available: usize, needed: usize },

    /// The two sides of a pair decode to different subject strings.
    #[error("inputs disagree: {left:?} decodes to {left_input:?}, {right:?} decodes to {right_input:?}")]
    InputMismatch {
        left: String,
        right: String,
        left_input: String,
        right_input: String,
    },

    /// A recorded operation does not start from the text the replay has
    /// reached.
    #[error("{text:?} applies to {found:?} but the replay is at {expected:?}")]
    StateMismatch {
        text: String,
        expected: String,
        found: String,
    },

    #[error("merge failure: {0}")]
    Divergence(Box<Divergence>),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Everything needed to reproduce a pair that failed to converge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Divergence {
    pub input: String,
    pub left: String,
    pub right: String,
    pub encoded_left: Vec<String>,
    pub encoded_right: Vec<String>,
    pub output_left: String,
    pub output_right: String,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(
            f,
            "{}\n{} x {}\n{:?} x {:?}\n{} x {}",
            self.input,
            self.left,
            self.right,
            self.encoded_left,
            self.encoded_right,
            self.output_left,
            self.output_right,
        );
    }
}
