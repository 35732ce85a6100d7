//! Prefix number scanners.
//!
//! Each scanner converts the longest prefix of its input that forms a number and reports
//! the offset where it stopped, in the manner of `strtol`/`strtoul`/`strtod`. Deciding what
//! may follow the number is left to the caller.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanStatus {
    Ok,
    /// No number could be formed.
    Invalid,
    /// A number was formed but does not fit the target type.
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Scanned<T> {
    pub value: T,
    /// Bytes consumed; 0 means no conversion.
    pub end: usize,
    pub status: ScanStatus,
}

impl<T> Scanned<T> {
    fn ok(value: T, end: usize) -> Self {
        Self {
            value,
            end,
            status: ScanStatus::Ok,
        }
    }

    fn range(value: T, end: usize) -> Self {
        Self {
            value,
            end,
            status: ScanStatus::Range,
        }
    }

    fn invalid(value: T) -> Self {
        Self {
            value,
            end: 0,
            status: ScanStatus::Invalid,
        }
    }
}

pub(crate) fn is_valid_base(base: u32) -> bool {
    base == 0 || (2..=36).contains(&base)
}

#[inline]
fn digit_value(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some(u32::from(b - b'0')),
        b'a'..=b'z' => Some(u32::from(b - b'a') + 10),
        b'A'..=b'Z' => Some(u32::from(b - b'A') + 10),
        _ => None,
    }
}

struct Magnitude {
    value: u64,
    negative: bool,
    end: usize,
    overflow: bool,
}

fn scan_magnitude(bytes: &[u8], base: u32) -> Option<Magnitude> {
    let mut i = 0usize;
    let mut negative = false;
    match bytes.first() {
        Some(b'+') => i = 1,
        Some(b'-') => {
            negative = true;
            i = 1;
        }
        _ => {}
    }

    // "0x" only counts as a prefix when a hex digit follows it
    let hex_prefix = bytes.get(i) == Some(&b'0')
        && matches!(bytes.get(i + 1), Some(b'x' | b'X'))
        && bytes
            .get(i + 2)
            .and_then(|&b| digit_value(b))
            .is_some_and(|d| d < 16);
    let mut base = base;
    if (base == 0 || base == 16) && hex_prefix {
        base = 16;
        i += 2;
    } else if base == 0 {
        base = if bytes.get(i) == Some(&b'0') { 8 } else { 10 };
    }

    let start = i;
    let mut value = 0u64;
    let mut overflow = false;
    while let Some(d) = bytes
        .get(i)
        .and_then(|&b| digit_value(b))
        .filter(|&d| d < base)
    {
        match value
            .checked_mul(u64::from(base))
            .and_then(|v| v.checked_add(u64::from(d)))
        {
            Some(v) => value = v,
            None => overflow = true,
        }
        i += 1;
    }
    if i == start {
        return None;
    }
    Some(Magnitude {
        value,
        negative,
        end: i,
        overflow,
    })
}

/// Signed 64-bit conversion. `base` must satisfy [`is_valid_base`].
pub(crate) fn scan_i64(bytes: &[u8], base: u32) -> Scanned<i64> {
    let Some(m) = scan_magnitude(bytes, base) else {
        return Scanned::invalid(0);
    };
    let limit = if m.negative {
        i64::MIN.unsigned_abs()
    } else {
        i64::MAX as u64
    };
    if m.overflow || m.value > limit {
        let saturated = if m.negative { i64::MIN } else { i64::MAX };
        return Scanned::range(saturated, m.end);
    }
    let value = if m.negative {
        (m.value as i64).wrapping_neg()
    } else {
        m.value as i64
    };
    Scanned::ok(value, m.end)
}

/// Unsigned 64-bit conversion. A negative literal is reported as out of range instead of
/// being wrapped.
pub(crate) fn scan_u64(bytes: &[u8], base: u32) -> Scanned<u64> {
    let Some(m) = scan_magnitude(bytes, base) else {
        return Scanned::invalid(0);
    };
    if m.overflow {
        return Scanned::range(u64::MAX, m.end);
    }
    if m.negative && m.value != 0 {
        return Scanned::range(0, m.end);
    }
    Scanned::ok(m.value, m.end)
}

fn starts_with_ignore_case(bytes: &[u8], word: &[u8]) -> bool {
    bytes.len() >= word.len() && bytes[..word.len()].eq_ignore_ascii_case(word)
}

/// Decimal double conversion, including `inf`, `infinity` and `nan[(chars)]` in any case.
pub(crate) fn scan_f64(bytes: &[u8]) -> Scanned<f64> {
    let mut i = 0usize;
    let mut negative = false;
    match bytes.first() {
        Some(b'+') => i = 1,
        Some(b'-') => {
            negative = true;
            i = 1;
        }
        _ => {}
    }
    let signed = |v: f64| if negative { -v } else { v };

    let rest = &bytes[i..];
    if starts_with_ignore_case(rest, b"infinity") {
        return Scanned::ok(signed(f64::INFINITY), i + 8);
    }
    if starts_with_ignore_case(rest, b"inf") {
        return Scanned::ok(signed(f64::INFINITY), i + 3);
    }
    if starts_with_ignore_case(rest, b"nan") {
        let mut end = i + 3;
        if bytes.get(end) == Some(&b'(') {
            let payload = &bytes[end + 1..];
            let len = payload
                .iter()
                .take_while(|&&b| b.is_ascii_alphanumeric() || b == b'_')
                .count();
            if payload.get(len) == Some(&b')') {
                end += len + 2;
            }
        }
        return Scanned::ok(signed(f64::NAN), end);
    }

    let mut digits = 0usize;
    let mut nonzero = false;
    let mut consume_digits = |i: &mut usize| {
        while let Some(&b) = bytes.get(*i).filter(|b| b.is_ascii_digit()) {
            nonzero |= b != b'0';
            digits += 1;
            *i += 1;
        }
    };
    consume_digits(&mut i);
    if bytes.get(i) == Some(&b'.') {
        let mut j = i + 1;
        consume_digits(&mut j);
        i = j;
    }
    if digits == 0 {
        return Scanned::invalid(0.0);
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        if bytes.get(j).is_some_and(u8::is_ascii_digit) {
            while bytes.get(j).is_some_and(u8::is_ascii_digit) {
                j += 1;
            }
            i = j;
        }
    }

    let parsed = core::str::from_utf8(&bytes[..i])
        .ok()
        .and_then(|s| s.parse::<f64>().ok());
    let Some(value) = parsed else {
        return Scanned::invalid(0.0);
    };
    if value.is_infinite() || (value == 0.0 && nonzero) {
        return Scanned::range(value, i);
    }
    Scanned::ok(value, i)
}

/// Shortest round-trip text for a double; non-finite values print as `NaN`, `inf`, `-inf`.
pub(crate) fn format_f64(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "inf" } else { "-inf" });
    }
    let mut buf = ryu::Buffer::new();
    String::from(buf.format_finite(value))
}
