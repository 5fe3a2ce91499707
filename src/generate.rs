//! The generation pipeline: unique pairs in, checked records out.
//!
//! For each unique pair the generator decodes both operations, asks the
//! [`Merge`] implementation for continuations, and applies each side
//! followed by its continuation. The two results must be identical. A
//! pair that fails this check stops the run: [`Generator::run`] returns
//! every record or an error, never a partial list.

use std::iter;

use crate::enumerate::{Enumerator, PairKind, Triple};
use crate::error::{Divergence, Error, Result};
use crate::oracle::{Apply, Merge, Transformer};
use crate::record::Record;

pub struct Generator<M = Transformer, A = Transformer> {
    enumerator: Enumerator,
    alphabet: Vec<String>,
    merge: M,
    apply: A,
}

impl Generator {
    /// A generator backed by [`Transformer`].
    pub fn new(enumerator: Enumerator, alphabet: Vec<String>) -> Generator {
        return Generator::with_oracles(enumerator, alphabet, Transformer, Transformer);
    }
}

impl<M: Merge, A: Apply> Generator<M, A> {
    pub fn with_oracles(enumerator: Enumerator, alphabet: Vec<String>, merge: M, apply: A) -> Generator<M, A> {
        return Generator {
            enumerator,
            alphabet,
            merge,
            apply,
        };
    }

    pub fn enumerator(&self) -> &Enumerator {
        return &self.enumerator;
    }

    /// Merge one pair and check that both sides converge.
    pub fn check(&self, triple: &Triple) -> Result<Record> {
        let compact = self.enumerator.compact();
        let (input_left, left) = compact.decode(&triple.left)?;
        let (input_right, right) = compact.decode(&triple.right)?;
        if input_left != input_right || input_left != triple.input {
            return Err(Error::InputMismatch {
                left: triple.left.clone(),
                right: triple.right.clone(),
                left_input: input_left,
                right_input: input_right,
            });
        }
        let input = input_left;

        let (merged_left, merged_right) =
            self.merge
                .merge(&input, std::slice::from_ref(&left), std::slice::from_ref(&right))?;
        let all_left: Vec<_> = iter::once(left).chain(merged_left).collect();
        let all_right: Vec<_> = iter::once(right).chain(merged_right).collect();

        let mut encoded_left = compact.encode_all(&input, &all_left, &self.apply)?;
        let mut encoded_right = compact.encode_all(&input, &all_right, &self.apply)?;

        let output_left = self.apply.apply(&input, &all_left)?;
        let output_right = self.apply.apply(&input, &all_right)?;
        if output_left != output_right {
            return Err(Error::Divergence(Box::new(Divergence {
                input,
                left: triple.left.clone(),
                right: triple.right.clone(),
                encoded_left,
                encoded_right,
                output_left,
                output_right,
            })));
        }

        // the first entry re-encodes the pair's own operation
        encoded_left.remove(0);
        encoded_right.remove(0);
        return Ok(Record {
            input,
            output: output_left,
            left: vec![triple.left.clone()],
            right: vec![triple.right.clone()],
            left_merged: encoded_left,
            right_merged: encoded_right,
        });
    }

    /// Enumerate the unique pairs of `kind` and check every one of them.
    pub fn run(&self, kind: PairKind) -> Result<Vec<Record>> {
        let pairs = self.enumerator.unique_pairs(kind, &self.alphabet)?;
        let mut records = Vec::with_capacity(pairs.len());
        for triple in &pairs {
            let record = self.check(triple)?;
            tracing::debug!(
                left = %triple.left,
                right = %triple.right,
                output = %record.output,
                "converged"
            );
            records.push(record);
        }
        tracing::info!(
            ?kind,
            input = %self.enumerator.input(),
            records = records.len(),
            "generated fixtures"
        );
        return Ok(records);
    }
}
