//! Field lists chosen at run time.
//!
//! A [`FieldSpec`] names the type of one column (optionally with bounds); a list of them
//! describes a whole record. The textual form is a comma-separated list such as
//! `u32[1,100],f64,skip,str`.

use core::fmt;
use core::str::FromStr;

use crate::error::Error;
use crate::number::format_f64;

/// Inclusive bounds for a numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T> Bounds<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldSpec {
    I16(Option<Bounds<i16>>),
    I32(Option<Bounds<i32>>),
    I64(Option<Bounds<i64>>),
    U16(Option<Bounds<u16>>),
    U32(Option<Bounds<u32>>),
    U64(Option<Bounds<u64>>),
    F64(Option<Bounds<f64>>),
    Str,
    Skip,
}

impl FieldSpec {
    /// Whether reading this column produces a [`Value`].
    pub fn yields_value(&self) -> bool {
        !matches!(self, FieldSpec::Skip)
    }
}

/// A value read for one [`FieldSpec`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Value {
    I16(i16),
    I32(i32),
    I64(i64),
    U16(u16),
    U32(u32),
    U64(u64),
    F64(f64),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F64(v) => f.write_str(&format_f64(*v)),
            Value::Str(s) => f.write_str(s),
        }
    }
}

fn spec_error(spec: &str, message: impl Into<String>) -> Error {
    Error::FieldSpec {
        spec: spec.to_string(),
        message: message.into(),
    }
}

fn parse_bound<T: FromStr>(spec: &str, text: &str) -> Result<T, Error> {
    text.trim()
        .parse::<T>()
        .map_err(|_| spec_error(spec, format!("bad bound `{}`", text.trim())))
}

fn parse_bounds<T: FromStr + PartialOrd>(spec: &str, body: Option<&str>) -> Result<Option<Bounds<T>>, Error> {
    let Some(body) = body else {
        return Ok(None);
    };
    let Some((min, max)) = body.split_once(',') else {
        return Err(spec_error(spec, "bounds must be written as [min,max]"));
    };
    let min = parse_bound::<T>(spec, min)?;
    let max = parse_bound::<T>(spec, max)?;
    if min > max {
        return Err(spec_error(spec, "minimum is greater than maximum"));
    }
    Ok(Some(Bounds::new(min, max)))
}

impl FromStr for FieldSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        let (name, body) = match spec.split_once('[') {
            Some((name, rest)) => {
                let Some(body) = rest.strip_suffix(']') else {
                    return Err(spec_error(spec, "missing `]`"));
                };
                (name.trim(), Some(body))
            }
            None => (spec, None),
        };
        let field = match name.to_ascii_lowercase().as_str() {
            "i16" | "int16" => FieldSpec::I16(parse_bounds(spec, body)?),
            "i32" | "int32" | "int" => FieldSpec::I32(parse_bounds(spec, body)?),
            "i64" | "int64" => FieldSpec::I64(parse_bounds(spec, body)?),
            "u16" | "uint16" => FieldSpec::U16(parse_bounds(spec, body)?),
            "u32" | "uint32" => FieldSpec::U32(parse_bounds(spec, body)?),
            "u64" | "uint64" => FieldSpec::U64(parse_bounds(spec, body)?),
            "f64" | "double" => FieldSpec::F64(parse_bounds(spec, body)?),
            "str" | "string" | "skip" | "_" if body.is_some() => {
                return Err(spec_error(spec, "only numeric fields take bounds"));
            }
            "str" | "string" => FieldSpec::Str,
            "skip" | "_" => FieldSpec::Skip,
            "" => return Err(spec_error(spec, "empty field type")),
            other => return Err(spec_error(spec, format!("unknown field type `{other}`"))),
        };
        Ok(field)
    }
}

/// Parses a comma-separated field list. Commas inside `[...]` separate bounds, not fields.
pub fn parse_field_specs(list: &str) -> Result<Vec<FieldSpec>, Error> {
    let mut specs = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in list.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                specs.push(list[start..i].parse()?);
                start = i + 1;
            }
            _ => {}
        }
    }
    specs.push(list[start..].parse()?);
    Ok(specs)
}
