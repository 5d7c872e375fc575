//! Streaming aggregation of key-sorted delimited text.
//!
//! Records sharing the same key fields must arrive one after the other; every
//! such run is collapsed into a single output record holding the key followed
//! by sums, counts of non-empty values and joins of the requested columns.
//!
//! ```
//! use flatagg::{Aggregator, FieldSpec, FieldSpecs, InputStream, Options, ReaderSource};
//! use encoding::all::ISO_8859_1;
//! use std::io::Cursor;
//!
//! let specs = FieldSpecs::new(FieldSpec::Positions("1".into()))
//!     .sums(FieldSpec::Positions("2".into()));
//! let options = Options::new(specs).delimiter(",");
//! let input: InputStream = vec![ReaderSource::from_reader(
//!     Cursor::new("a,1.5\na,2\nb,4\n"),
//!     "sales",
//!     ISO_8859_1,
//! )]
//! .into_iter()
//! .collect();
//!
//! let mut out = Vec::new();
//! Aggregator::new(options)?.start(input)?.run(&mut out)?;
//!
//! assert_eq!(out, b"a,3.5\nb,4.0\n");
//! # Ok::<(), flatagg::Error>(())
//! ```
mod aggregator;
mod conf;
mod emit;
mod error;
mod field;
mod fieldspec;
mod headers;
mod input;
mod options;
mod reduce;

pub use aggregator::{Aggregator, Session, Stats};
pub use conf::AggConf;
pub use emit::{open_output, HeaderLabels, LineEmitter};
pub use error::{Error, ExitStatus, Result};
pub use field::{chomp, extract, field_count, join_fields, locate};
pub use fieldspec::{expand_labels, expand_positions, FieldSpec, FieldSpecs, Role, SpecError};
pub use headers::Headers;
pub use input::{InputStream, ReaderSource};
pub use options::{default_delimiter, expand_chars, Options, DEFAULT_DELIMITER, DELIMITER_ENV};
pub use reduce::aggregate::{parse_prefix, Aggregate, Count, Join, Sum};
pub use reduce::group::Group;
pub use reduce::Accumulator;
