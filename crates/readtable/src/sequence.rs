//! Reading a whole record in one call.
//!
//! Fields are read strictly in order and the first failure stops the sequence: later
//! fields are not attempted and the tokenizer's cursor, column and error describe the
//! failing field.

use crate::error::ErrorCode;
use crate::field::{BoundedField, ReadField};
use crate::record::{Bounds, FieldSpec, Value};
use crate::tokenizer::Tokenizer;

macro_rules! impl_read_field_tuple {
    ($($name:ident)+) => {
        impl<$($name: ReadField),+> ReadField for ($($name,)+) {
            #[allow(non_snake_case)]
            fn read_field(&mut self, tok: &mut Tokenizer) -> Result<(), ErrorCode> {
                let ($($name,)+) = self;
                $($name.read_field(tok)?;)+
                Ok(())
            }
        }
    };
}

impl_read_field_tuple!(A);
impl_read_field_tuple!(A B);
impl_read_field_tuple!(A B C);
impl_read_field_tuple!(A B C D);
impl_read_field_tuple!(A B C D E);
impl_read_field_tuple!(A B C D E F);
impl_read_field_tuple!(A B C D E F G);
impl_read_field_tuple!(A B C D E F G H);
impl_read_field_tuple!(A B C D E F G H I);
impl_read_field_tuple!(A B C D E F G H I J);
impl_read_field_tuple!(A B C D E F G H I J K);
impl_read_field_tuple!(A B C D E F G H I J K L);

fn read_value<T>(tok: &mut Tokenizer, bounds: Option<Bounds<T>>) -> Result<T, ErrorCode>
where
    T: ReadField + BoundedField + Default,
{
    let mut value = T::default();
    match bounds {
        Some(b) => T::read_bounded(tok, &mut value, &b.min, &b.max)?,
        None => value.read_field(tok)?,
    }
    Ok(value)
}

impl Tokenizer {
    /// Reads a tuple of slots, e.g. `tok.read((&mut id, Skip, bounds(&mut x, 0, 9)))`.
    pub fn read<F: ReadField>(&mut self, mut fields: F) -> Result<(), ErrorCode> {
        fields.read_field(self)
    }

    /// Reads a list of heterogeneous slots.
    pub fn read_fields(&mut self, fields: &mut [&mut dyn ReadField]) -> Result<(), ErrorCode> {
        for field in fields.iter_mut() {
            field.read_field(self)?;
        }
        Ok(())
    }

    /// Reads one field described by `spec`. `Skip` yields `None`.
    pub fn read_spec(&mut self, spec: &FieldSpec) -> Result<Option<Value>, ErrorCode> {
        let value = match *spec {
            FieldSpec::I16(b) => Value::I16(read_value(self, b)?),
            FieldSpec::I32(b) => Value::I32(read_value(self, b)?),
            FieldSpec::I64(b) => Value::I64(read_value(self, b)?),
            FieldSpec::U16(b) => Value::U16(read_value(self, b)?),
            FieldSpec::U32(b) => Value::U32(read_value(self, b)?),
            FieldSpec::U64(b) => Value::U64(read_value(self, b)?),
            FieldSpec::F64(b) => Value::F64(read_value(self, b)?),
            FieldSpec::Str => Value::Str(self.read_str()?.to_owned()),
            FieldSpec::Skip => {
                self.skip()?;
                return Ok(None);
            }
        };
        Ok(Some(value))
    }

    /// Reads the fields described by `specs` into `out`, which is cleared first.
    ///
    /// On failure `out` holds the values read before the failing field.
    pub fn read_record(&mut self, specs: &[FieldSpec], out: &mut Vec<Value>) -> Result<(), ErrorCode> {
        out.clear();
        for spec in specs {
            if let Some(value) = self.read_spec(spec)? {
                out.push(value);
            }
        }
        Ok(())
    }
}
