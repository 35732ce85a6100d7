//! One read operation per output type.
//!
//! [`ReadField`] is implemented for every supported slot type, so a single generic call
//! picks the right conversion from the type of the slot:
//!
//! ```
//! use readtable::{Bounded, Options, Skip, Tokenizer};
//!
//! let mut tok = Tokenizer::from_line("7 ignored 2.5", Options::default());
//! let (mut id, mut weight) = (0u32, 0.0f64);
//! tok.read_next(&mut Bounded::new(&mut id, 1, 10))?;
//! tok.read_next(&mut Skip)?;
//! tok.read_next(&mut weight)?;
//! assert_eq!((id, weight), (7, 2.5));
//! # Ok::<(), readtable::ErrorCode>(())
//! ```

use crate::error::ErrorCode;
use crate::tokenizer::{Span, Tokenizer};

/// A slot that one field (or, for tuples, several consecutive fields) can be read into.
pub trait ReadField {
    fn read_field(&mut self, tok: &mut Tokenizer) -> Result<(), ErrorCode>;
}

/// Slot types that can be read with explicit inclusive bounds.
pub trait BoundedField: Sized {
    fn read_bounded(
        tok: &mut Tokenizer,
        out: &mut Self,
        min: &Self,
        max: &Self,
    ) -> Result<(), ErrorCode>;
}

/// Marker that consumes one field and discards it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Skip;

/// An output slot together with inclusive bounds for the value read into it.
#[derive(Debug)]
pub struct Bounded<'a, T> {
    pub value: &'a mut T,
    pub min: T,
    pub max: T,
}

impl<'a, T> Bounded<'a, T> {
    pub fn new(value: &'a mut T, min: T, max: T) -> Self {
        Self { value, min, max }
    }
}

impl<'a> Bounded<'a, (f64, f64)> {
    /// Longitude/latitude pair: first value in [-180, 180], second in [-90, 90].
    pub fn coords(value: &'a mut (f64, f64)) -> Self {
        Self::new(value, (-180.0, -90.0), (180.0, 90.0))
    }
}

/// Shorthand for [`Bounded::new`].
pub fn bounds<T>(value: &mut T, min: T, max: T) -> Bounded<'_, T> {
    Bounded::new(value, min, max)
}

macro_rules! impl_numeric_field {
    ($($t:ty => $read:ident, $read_in:ident;)*) => {
        $(
            impl ReadField for $t {
                #[inline]
                fn read_field(&mut self, tok: &mut Tokenizer) -> Result<(), ErrorCode> {
                    tok.$read(self)
                }
            }

            impl BoundedField for $t {
                #[inline]
                fn read_bounded(
                    tok: &mut Tokenizer,
                    out: &mut Self,
                    min: &Self,
                    max: &Self,
                ) -> Result<(), ErrorCode> {
                    tok.$read_in(out, *min, *max)
                }
            }
        )*
    };
}

impl_numeric_field! {
    i16 => read_i16, read_i16_in;
    u16 => read_u16, read_u16_in;
    i32 => read_i32, read_i32_in;
    u32 => read_u32, read_u32_in;
    i64 => read_i64, read_i64_in;
    u64 => read_u64, read_u64_in;
    f64 => read_f64, read_f64_in;
}

/// The pair is stored only when both components are read. A bound violation still leaves
/// the clamped value in the component that failed.
impl BoundedField for (f64, f64) {
    fn read_bounded(
        tok: &mut Tokenizer,
        out: &mut Self,
        min: &Self,
        max: &Self,
    ) -> Result<(), ErrorCode> {
        let (mut first, mut second) = *out;
        if let Err(code) = tok.read_f64_in(&mut first, min.0, max.0) {
            out.0 = first;
            return Err(code);
        }
        if let Err(code) = tok.read_f64_in(&mut second, min.1, max.1) {
            out.1 = second;
            return Err(code);
        }
        *out = (first, second);
        Ok(())
    }
}

impl<T: BoundedField> ReadField for Bounded<'_, T> {
    fn read_field(&mut self, tok: &mut Tokenizer) -> Result<(), ErrorCode> {
        T::read_bounded(tok, self.value, &self.min, &self.max)
    }
}

impl ReadField for Skip {
    fn read_field(&mut self, tok: &mut Tokenizer) -> Result<(), ErrorCode> {
        tok.skip()
    }
}

impl ReadField for String {
    fn read_field(&mut self, tok: &mut Tokenizer) -> Result<(), ErrorCode> {
        let s = tok.read_str()?;
        self.clear();
        self.push_str(s);
        Ok(())
    }
}

impl ReadField for Vec<u8> {
    fn read_field(&mut self, tok: &mut Tokenizer) -> Result<(), ErrorCode> {
        let b = tok.read_bytes()?;
        self.clear();
        self.extend_from_slice(b);
        Ok(())
    }
}

impl ReadField for Span {
    fn read_field(&mut self, tok: &mut Tokenizer) -> Result<(), ErrorCode> {
        *self = tok.read_span()?;
        Ok(())
    }
}

impl<T: ReadField + ?Sized> ReadField for &mut T {
    #[inline]
    fn read_field(&mut self, tok: &mut Tokenizer) -> Result<(), ErrorCode> {
        (**self).read_field(tok)
    }
}

impl<T: ReadField + ?Sized> ReadField for Box<T> {
    fn read_field(&mut self, tok: &mut Tokenizer) -> Result<(), ErrorCode> {
        (**self).read_field(tok)
    }
}

impl Tokenizer {
    /// Reads one field into `field`, choosing the conversion from its type.
    pub fn read_next<F: ReadField + ?Sized>(&mut self, field: &mut F) -> Result<(), ErrorCode> {
        field.read_field(self)
    }
}
