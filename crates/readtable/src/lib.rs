#![doc = include_str!("../README.md")]

pub mod error;
pub mod options;
pub mod tokenizer;
pub mod field;
pub mod record;
pub mod reader;
pub mod source;

mod convert;
mod number;
mod sequence;

pub use crate::error::{Diagnostic, Error, ErrorCode, Result};
pub use crate::field::{Bounded, BoundedField, ReadField, Skip, bounds};
pub use crate::options::Options;
pub use crate::reader::LineReader;
pub use crate::record::{Bounds, FieldSpec, Value, parse_field_specs};
pub use crate::source::PullSource;
pub use crate::tokenizer::{Span, Tokenizer};

use std::io::Read;

/// Parses one line against a field list.
///
/// Errors are reported as a [`Diagnostic`] for line 1 of `input`.
pub fn parse_record(line: &str, options: &Options, specs: &[FieldSpec]) -> Result<Vec<Value>> {
    let mut tok = Tokenizer::from_line(line, *options);
    let mut values = Vec::with_capacity(specs.len());
    match tok.read_record(specs, &mut values) {
        Ok(()) => Ok(values),
        Err(_) => Err(Error::Parse(tok.diagnostic(None, 1))),
    }
}

/// Reads every record of `reader`, skipping blank and comment lines.
///
/// Stops at the first failing record and reports where it failed.
pub fn read_records<R: Read>(reader: R, options: &Options, specs: &[FieldSpec]) -> Result<Vec<Vec<Value>>> {
    let mut reader = LineReader::new(reader, *options);
    let mut records = Vec::new();
    while reader.next_line().is_ok() {
        let mut values = Vec::with_capacity(specs.len());
        if reader.read_record(specs, &mut values).is_err() {
            return Err(Error::Parse(reader.diagnostic()));
        }
        records.push(values);
    }
    reader.check()?;
    Ok(records)
}
