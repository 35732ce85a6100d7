//! Bounds-checked numeric field conversions.
//!
//! Every conversion runs the shared pre/post checks around a prefix scanner and then
//! applies an inclusive `[min, max]` bound. A bound violation fails with
//! `OverflowOrUnderflow` and leaves the violated bound in the output slot. 16-bit reads go
//! through the 32-bit path and narrow the result.

use crate::error::ErrorCode;
use crate::number;
use crate::tokenizer::{Mark, Tokenizer};

impl Tokenizer {
    pub fn read_i16(&mut self, out: &mut i16) -> Result<(), ErrorCode> {
        self.read_i16_in(out, i16::MIN, i16::MAX)
    }

    pub fn read_i16_in(&mut self, out: &mut i16, min: i16, max: i16) -> Result<(), ErrorCode> {
        let mut wide = i32::from(*out);
        let result = self.read_i32_in(&mut wide, i32::from(min), i32::from(max));
        // wide is either untouched or within [min, max]
        *out = wide as i16;
        result
    }

    pub fn read_u16(&mut self, out: &mut u16) -> Result<(), ErrorCode> {
        self.read_u16_in(out, u16::MIN, u16::MAX)
    }

    pub fn read_u16_in(&mut self, out: &mut u16, min: u16, max: u16) -> Result<(), ErrorCode> {
        let mut wide = u32::from(*out);
        let result = self.read_u32_in(&mut wide, u32::from(min), u32::from(max));
        *out = wide as u16;
        result
    }

    pub fn read_i32(&mut self, out: &mut i32) -> Result<(), ErrorCode> {
        self.read_i32_in(out, i32::MIN, i32::MAX)
    }

    pub fn read_i32_in(&mut self, out: &mut i32, min: i32, max: i32) -> Result<(), ErrorCode> {
        let (value, mark) = self.convert_signed()?;
        let mut wide = i64::from(*out);
        let result = self.apply_bounds(&mut wide, value, i64::from(min), i64::from(max), mark);
        *out = wide as i32;
        result
    }

    pub fn read_u32(&mut self, out: &mut u32) -> Result<(), ErrorCode> {
        self.read_u32_in(out, u32::MIN, u32::MAX)
    }

    pub fn read_u32_in(&mut self, out: &mut u32, min: u32, max: u32) -> Result<(), ErrorCode> {
        let (value, mark) = self.convert_unsigned()?;
        let mut wide = u64::from(*out);
        let result = self.apply_bounds(&mut wide, value, u64::from(min), u64::from(max), mark);
        *out = wide as u32;
        result
    }

    pub fn read_i64(&mut self, out: &mut i64) -> Result<(), ErrorCode> {
        self.read_i64_in(out, i64::MIN, i64::MAX)
    }

    pub fn read_i64_in(&mut self, out: &mut i64, min: i64, max: i64) -> Result<(), ErrorCode> {
        let (value, mark) = self.convert_signed()?;
        self.apply_bounds(out, value, min, max, mark)
    }

    pub fn read_u64(&mut self, out: &mut u64) -> Result<(), ErrorCode> {
        self.read_u64_in(out, u64::MIN, u64::MAX)
    }

    pub fn read_u64_in(&mut self, out: &mut u64, min: u64, max: u64) -> Result<(), ErrorCode> {
        let (value, mark) = self.convert_unsigned()?;
        self.apply_bounds(out, value, min, max, mark)
    }

    /// Reads a double without explicit bounds.
    ///
    /// NaN and infinities are accepted unless `allow_nonfinite` is off, in which case they
    /// fail with `NonFiniteValue`.
    pub fn read_f64(&mut self, out: &mut f64) -> Result<(), ErrorCode> {
        let (value, mark) = self.convert_double()?;
        if !value.is_finite() && !self.options.allow_nonfinite {
            return self.reject(mark, ErrorCode::NonFiniteValue);
        }
        *out = value;
        Ok(())
    }

    /// Reads a double within `[min, max]`.
    ///
    /// NaN always fails with `NonFiniteValue`; infinities do when `allow_nonfinite` is off
    /// and are otherwise subject to the bounds.
    pub fn read_f64_in(&mut self, out: &mut f64, min: f64, max: f64) -> Result<(), ErrorCode> {
        let (value, mark) = self.convert_double()?;
        if value.is_nan() || (value.is_infinite() && !self.options.allow_nonfinite) {
            return self.reject(mark, ErrorCode::NonFiniteValue);
        }
        self.apply_bounds(out, value, min, max, mark)
    }

    fn check_base(&mut self) -> Result<u32, ErrorCode> {
        let base = self.options.base;
        if number::is_valid_base(base) {
            Ok(base)
        } else {
            self.fail(ErrorCode::UnsupportedConversion)
        }
    }

    fn convert_signed(&mut self) -> Result<(i64, Mark), ErrorCode> {
        self.begin_field()?;
        self.pre_check(true)?;
        let base = self.check_base()?;
        let mark = self.mark();
        let scanned = number::scan_i64(self.remaining(), base);
        self.post_check(scanned.end, scanned.status)?;
        Ok((scanned.value, mark))
    }

    fn convert_unsigned(&mut self) -> Result<(u64, Mark), ErrorCode> {
        self.begin_field()?;
        self.pre_check(true)?;
        let base = self.check_base()?;
        // the scanner would accept a sign; only '+' is allowed here
        match self.remaining().first() {
            Some(b'-') => return self.fail(ErrorCode::OverflowOrUnderflow),
            Some(&b) if b.is_ascii_alphanumeric() || b == b'+' => {}
            _ => return self.fail(ErrorCode::InvalidFormat),
        }
        let mark = self.mark();
        let scanned = number::scan_u64(self.remaining(), base);
        self.post_check(scanned.end, scanned.status)?;
        Ok((scanned.value, mark))
    }

    fn convert_double(&mut self) -> Result<(f64, Mark), ErrorCode> {
        self.begin_field()?;
        self.pre_check(true)?;
        let mark = self.mark();
        let scanned = number::scan_f64(self.remaining());
        self.post_check(scanned.end, scanned.status)?;
        Ok((scanned.value, mark))
    }

    fn apply_bounds<T: PartialOrd + Copy>(
        &mut self,
        out: &mut T,
        value: T,
        min: T,
        max: T,
        mark: Mark,
    ) -> Result<(), ErrorCode> {
        if value < min {
            *out = min;
            return self.reject(mark, ErrorCode::OverflowOrUnderflow);
        }
        if value > max {
            *out = max;
            return self.reject(mark, ErrorCode::OverflowOrUnderflow);
        }
        *out = value;
        Ok(())
    }
}
