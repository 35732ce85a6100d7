//! Cursor-driven scanning of a single line.
//!
//! A [`Tokenizer`] owns the bytes of the current line, a cursor into them, the number of
//! fields consumed so far, and the code of the last operation. Every typed read shares the
//! same protocol: [`pre_check`](Tokenizer::pre_check) finds the start of the field, the
//! conversion runs from there, and [`post_check`](Tokenizer::post_check) validates what
//! follows the converted text.

use core::ops::Range;

use crate::error::{Diagnostic, ErrorCode};
use crate::number::ScanStatus;
use crate::options::Options;

/// Position of a string field inside the line it was read from.
///
/// A span only stays meaningful while that line is loaded; resolving it after the next
/// line load returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
    generation: u64,
}

impl Span {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Cursor and column at the start of a field, used to undo a rejected conversion.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Mark {
    pos: usize,
    col: usize,
    exhausted: bool,
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    pub(crate) line: Vec<u8>,
    pub(crate) pos: usize,
    pub(crate) col: usize,
    pub(crate) last_error: ErrorCode,
    pub(crate) options: Options,
    /// Set when a delimiter-mode field ended at end of line; no field remains.
    exhausted: bool,
    /// Bumped on every line load; ties [`Span`]s to their line.
    generation: u64,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Tokenizer {
    pub fn new(options: Options) -> Self {
        Self {
            line: Vec::new(),
            pos: 0,
            col: 0,
            last_error: ErrorCode::Ok,
            options,
            exhausted: false,
            generation: 0,
        }
    }

    /// Tokenizer positioned at the start of `line`. One trailing line ending is removed.
    pub fn from_line(line: impl AsRef<[u8]>, options: Options) -> Self {
        let mut tok = Self::new(options);
        tok.set_line(line);
        tok
    }

    /// Replaces the current line, resetting cursor, column and error state.
    ///
    /// Terminal states are not cleared by this; see [`LineReader`](crate::LineReader).
    pub fn set_line(&mut self, line: impl AsRef<[u8]>) {
        if self.last_error.is_terminal() {
            return;
        }
        self.line.clear();
        self.line.extend_from_slice(line.as_ref());
        strip_line_ending(&mut self.line);
        self.start_line();
    }

    pub(crate) fn start_line(&mut self) {
        self.pos = 0;
        self.col = 0;
        self.exhausted = false;
        self.last_error = ErrorCode::Ok;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Moves the whole state out, leaving `self` permanently invalidated.
    pub fn take(&mut self) -> Tokenizer {
        let options = self.options;
        let generation = self.generation.wrapping_add(1);
        let mut donor = Tokenizer::new(options);
        donor.last_error = ErrorCode::InvalidatedInstance;
        donor.generation = generation;
        core::mem::replace(self, donor)
    }

    // ----- accessors ---------------------------------------------------------------------

    /// Bytes of the current line without its line ending.
    pub fn line(&self) -> &[u8] {
        &self.line
    }

    /// The current line as text, if it is valid UTF-8.
    pub fn line_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.line).ok()
    }

    /// Unconsumed part of the current line.
    pub fn remaining(&self) -> &[u8] {
        &self.line[self.pos..]
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of fields consumed on the current line.
    pub fn column(&self) -> usize {
        self.col
    }

    pub fn last_error(&self) -> ErrorCode {
        self.last_error
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn delimiter(&self) -> Option<u8> {
        self.options.delimiter
    }

    pub fn set_delimiter(&mut self, delimiter: Option<u8>) {
        self.options.delimiter = delimiter;
    }

    pub fn comment(&self) -> Option<u8> {
        self.options.comment
    }

    pub fn set_comment(&mut self, comment: Option<u8>) {
        self.options.comment = comment;
    }

    pub fn base(&self) -> u32 {
        self.options.base
    }

    pub fn set_base(&mut self, base: u32) {
        self.options.base = base;
    }

    pub fn allow_nonfinite(&self) -> bool {
        self.options.allow_nonfinite
    }

    pub fn set_allow_nonfinite(&mut self, allow: bool) {
        self.options.allow_nonfinite = allow;
    }

    /// Diagnostic for the current state, attributed to `source` (file name) and `line`.
    pub fn diagnostic(&self, source: Option<&str>, line: u64) -> Diagnostic {
        Diagnostic {
            source: source.map(str::to_owned),
            line,
            position: self.pos,
            column: self.col,
            code: self.last_error,
        }
    }

    // ----- byte classes ------------------------------------------------------------------

    #[inline]
    pub(crate) fn is_blank(&self, b: u8) -> bool {
        (b == b' ' || b == b'\t') && self.options.delimiter != Some(b)
    }

    #[inline]
    fn is_line_end(&self, b: u8) -> bool {
        b == b'\n' || self.options.comment == Some(b)
    }

    #[inline]
    fn at_line_end(&self) -> bool {
        self.line
            .get(self.pos)
            .is_none_or(|&b| self.is_line_end(b))
    }

    /// Skips blanks at the cursor; reports whether any were skipped.
    fn skip_blanks(&mut self) -> bool {
        let start = self.pos;
        while self.line.get(self.pos).is_some_and(|&b| self.is_blank(b)) {
            self.pos += 1;
        }
        self.pos > start
    }

    // ----- shared field protocol ---------------------------------------------------------

    #[inline]
    pub(crate) fn fail<T>(&mut self, code: ErrorCode) -> Result<T, ErrorCode> {
        self.last_error = code;
        Err(code)
    }

    /// Gate run before every field operation.
    pub(crate) fn begin_field(&mut self) -> Result<(), ErrorCode> {
        if self.last_error.is_terminal() {
            return Err(self.last_error);
        }
        if self.exhausted {
            return self.fail(ErrorCode::UnexpectedEndOfLine);
        }
        Ok(())
    }

    pub(crate) fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            col: self.col,
            exhausted: self.exhausted,
        }
    }

    /// Undoes a field that converted but was then rejected.
    pub(crate) fn reject<T>(&mut self, mark: Mark, code: ErrorCode) -> Result<T, ErrorCode> {
        self.pos = mark.pos;
        self.col = mark.col;
        self.exhausted = mark.exhausted;
        self.fail(code)
    }

    /// Locates the start of the next field.
    ///
    /// Skips blanks, then fails with `UnexpectedEndOfLine` at end of line or a comment
    /// marker, and with `MissingValue` at a delimiter (an explicitly empty field). With
    /// `advance_pos` false the cursor is restored when the check fails.
    pub(crate) fn pre_check(&mut self, advance_pos: bool) -> Result<(), ErrorCode> {
        let start = self.pos;
        self.skip_blanks();
        let code = if self.at_line_end() {
            ErrorCode::UnexpectedEndOfLine
        } else if self.options.delimiter == Some(self.line[self.pos]) {
            ErrorCode::MissingValue
        } else {
            return Ok(());
        };
        if !advance_pos {
            self.pos = start;
        }
        self.fail(code)
    }

    /// Validates what follows a conversion that consumed `consumed` bytes from the cursor.
    ///
    /// The number must be followed by end of line, a comment, or a field separator: at
    /// least one blank when no delimiter is set (so `12abc` is rejected), or exactly the
    /// delimiter, which is consumed. In delimiter mode a number that ends the line leaves
    /// no further field on it.
    pub(crate) fn post_check(&mut self, consumed: usize, status: ScanStatus) -> Result<(), ErrorCode> {
        match status {
            _ if consumed == 0 => return self.fail(ErrorCode::InvalidFormat),
            ScanStatus::Invalid => return self.fail(ErrorCode::InvalidFormat),
            ScanStatus::Range => return self.fail(ErrorCode::OverflowOrUnderflow),
            ScanStatus::Ok => {}
        }
        self.pos = (self.pos + consumed).min(self.line.len());
        let had_blank = self.skip_blanks();
        if self.at_line_end() {
            self.exhausted = self.options.delimiter.is_some();
        } else {
            match self.options.delimiter {
                None if !had_blank => return self.fail(ErrorCode::InvalidFormat),
                None => {}
                Some(d) if self.line[self.pos] != d => return self.fail(ErrorCode::InvalidFormat),
                Some(_) => self.pos += 1,
            }
        }
        self.col += 1;
        self.last_error = ErrorCode::Ok;
        Ok(())
    }

    // ----- untyped fields ----------------------------------------------------------------

    #[cfg(feature = "perf_memchr")]
    fn find_field_end(&self, delimiter: u8) -> Option<usize> {
        let rest = &self.line[self.pos..];
        match self.options.comment {
            Some(c) => memchr::memchr3(delimiter, b'\n', c, rest),
            None => memchr::memchr2(delimiter, b'\n', rest),
        }
    }

    #[cfg(not(feature = "perf_memchr"))]
    fn find_field_end(&self, delimiter: u8) -> Option<usize> {
        self.line[self.pos..]
            .iter()
            .position(|&b| b == delimiter || self.is_line_end(b))
    }

    /// Finds the extent of the next field without committing to it.
    ///
    /// Returns the field's byte range, the cursor position after it, and whether the line
    /// ends with this field.
    fn scan_field(&mut self) -> Result<(Range<usize>, usize, bool), ErrorCode> {
        self.begin_field()?;
        match self.options.delimiter {
            Some(d) => {
                let start = self.pos;
                match self.find_field_end(d).map(|i| start + i) {
                    Some(end) if self.line[end] == d => Ok((start..end, end + 1, false)),
                    Some(end) => Ok((start..end, end, true)),
                    None => Ok((start..self.line.len(), self.line.len(), true)),
                }
            }
            None => {
                self.pre_check(true)?;
                let start = self.pos;
                let len = self.line[start..]
                    .iter()
                    .position(|&b| b == b' ' || b == b'\t' || self.is_line_end(b))
                    .unwrap_or(self.line.len() - start);
                Ok((start..start + len, start + len, false))
            }
        }
    }

    fn commit_field(&mut self, next: usize, last: bool) {
        self.pos = next;
        self.exhausted = last;
        self.col += 1;
        self.last_error = ErrorCode::Ok;
    }

    /// Skips one field without looking at its content.
    pub fn skip(&mut self) -> Result<(), ErrorCode> {
        let (_, next, last) = self.scan_field()?;
        self.commit_field(next, last);
        Ok(())
    }

    /// Reads one field as a [`Span`] into the current line.
    pub fn read_span(&mut self) -> Result<Span, ErrorCode> {
        let (range, next, last) = self.scan_field()?;
        self.commit_field(next, last);
        Ok(Span {
            offset: range.start,
            len: range.len(),
            generation: self.generation,
        })
    }

    /// Reads one field as raw bytes borrowed from the current line.
    pub fn read_bytes(&mut self) -> Result<&[u8], ErrorCode> {
        let (range, next, last) = self.scan_field()?;
        self.commit_field(next, last);
        Ok(&self.line[range])
    }

    /// Reads one field as text borrowed from the current line.
    ///
    /// Fails with `InvalidFormat`, without consuming the field, if it is not UTF-8.
    pub fn read_str(&mut self) -> Result<&str, ErrorCode> {
        let (range, next, last) = self.scan_field()?;
        if core::str::from_utf8(&self.line[range.clone()]).is_err() {
            return self.fail(ErrorCode::InvalidFormat);
        }
        self.commit_field(next, last);
        core::str::from_utf8(&self.line[range]).map_err(|_| ErrorCode::InvalidFormat)
    }

    /// Bytes of a span read from the current line; `None` once another line was loaded.
    pub fn span_bytes(&self, span: Span) -> Option<&[u8]> {
        if span.generation != self.generation {
            return None;
        }
        self.line.get(span.range())
    }

    pub fn span_str(&self, span: Span) -> Option<&str> {
        self.span_bytes(span)
            .and_then(|b| core::str::from_utf8(b).ok())
    }

    /// True when no further field starts on this line (only blanks or a comment remain).
    ///
    /// Leaves cursor, column and error state untouched.
    pub fn at_end_of_line(&self) -> bool {
        if self.exhausted {
            return true;
        }
        let rest = &self.line[self.pos..];
        let first = rest.iter().position(|&b| !self.is_blank(b));
        first.is_none_or(|i| self.is_line_end(rest[i]))
    }
}

/// Removes one trailing `\n` and then one trailing `\r`.
pub(crate) fn strip_line_ending(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
}
