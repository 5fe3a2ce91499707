//! Dataset - exhaustive test vectors for concurrent text operations.
//!
//! The generator enumerates every replace and move over a short subject
//! string, keeps one pair of operations per isomorphism class, merges
//! each pair, checks that both sides converge, and writes the result as
//! fixture records in compact form.
//!
//! # Quick Start
//!
//! ```
//! use dataset::compact::Compact;
//! use dataset::op::{Op, Replace};
//!
//! let compact = Compact::default();
//! let op = Op::Replace(Replace::new(2, "cd", "xyz"));
//! let text = compact.encode("abcdefg", &op).unwrap();
//! assert_eq!(text, "ab(cd=xyz)efg");
//!
//! let (input, decoded) = compact.decode(&text).unwrap();
//! assert_eq!(input, "abcdefg");
//! assert_eq!(decoded, op);
//! ```
//!
//! Generating fixtures:
//!
//! ```no_run
//! use dataset::config::GeneratorConfig;
//! use dataset::record::Fixture;
//!
//! let config = GeneratorConfig::splices();
//! let records = config.generator()?.run(config.kind)?;
//! Fixture::new(records).write_to(std::io::stdout().lock())?;
//! # Ok::<(), dataset::Error>(())
//! ```

pub mod compact;
pub mod config;
pub mod enumerate;
pub mod error;
pub mod generate;
pub mod normalize;
pub mod op;
pub mod oracle;
pub mod record;
pub mod telemetry;
pub mod units;

pub use error::{Error, Result};
