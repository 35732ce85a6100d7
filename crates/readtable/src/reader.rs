//! Line-by-line reading from a byte source.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::ops::{Deref, DerefMut};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{Diagnostic, Error, ErrorCode, Result};
use crate::options::Options;
use crate::source::PullSource;
use crate::tokenizer::{Tokenizer, strip_line_ending};

/// Supplies successive lines of a byte source to a [`Tokenizer`].
///
/// The reader derefs to its tokenizer, so field reads are called on it directly:
///
/// ```
/// use readtable::{LineReader, Options, Skip};
///
/// let input = "# id  name  score\n1  ann  0.5\n\n2  bob  0.75\n";
/// let mut reader = LineReader::new(input.as_bytes(), Options::default().with_comment(b'#'));
/// let mut total = 0.0;
/// while reader.next_line().is_ok() {
///     let (mut id, mut score) = (0u32, 0.0f64);
///     reader.read((&mut id, Skip, &mut score))?;
///     total += score;
/// }
/// assert_eq!(reader.last_error(), readtable::ErrorCode::EndOfInput);
/// assert_eq!(reader.line_number(), 4);
/// assert_eq!(total, 1.25);
/// # Ok::<(), readtable::ErrorCode>(())
/// ```
///
/// A reader built with [`open`](LineReader::open) owns its file and closes it on drop; one
/// built with [`new`](LineReader::new) over `&mut R` leaves the stream to the caller.
#[derive(Debug)]
pub struct LineReader<R> {
    tokenizer: Tokenizer,
    source: Option<BufReader<R>>,
    line_number: u64,
    source_name: Option<String>,
}

impl LineReader<File> {
    /// Opens `path` for reading.
    ///
    /// Failure to open is not returned as an error: the reader starts in the terminal
    /// `FileOpenError` state and every operation on it fails.
    pub fn open<P: AsRef<Path>>(path: P, options: Options) -> Self {
        let path = path.as_ref();
        let name = path.display().to_string();
        match File::open(path) {
            Ok(file) => Self::new(file, options).with_source_name(name),
            Err(err) => {
                debug!(path = %name, error = %err, "failed to open input");
                let mut tokenizer = Tokenizer::new(options);
                tokenizer.last_error = ErrorCode::FileOpenError;
                Self {
                    tokenizer,
                    source: None,
                    line_number: 0,
                    source_name: Some(name),
                }
            }
        }
    }
}

impl<F: FnMut(&mut [u8]) -> usize> LineReader<PullSource<F>> {
    /// Reader over a pull function; see [`PullSource`].
    pub fn from_pull(pull: F, options: Options) -> Self {
        Self::new(PullSource::new(pull), options)
    }
}

impl<R: Read> LineReader<R> {
    pub fn new(source: R, options: Options) -> Self {
        Self {
            tokenizer: Tokenizer::new(options),
            source: Some(BufReader::new(source)),
            line_number: 0,
            source_name: None,
        }
    }

    /// Name shown in diagnostics instead of `input`.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    pub fn set_source_name(&mut self, name: Option<String>) {
        self.source_name = name;
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Number of raw lines consumed so far, counting skipped ones; 1-based.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn tokenizer_mut(&mut self) -> &mut Tokenizer {
        &mut self.tokenizer
    }

    /// Loads the next line, discarding whatever is left of the current one.
    ///
    /// With `skip_blank`, lines holding only blanks or starting (after blanks) with the
    /// comment marker are consumed and skipped. When no delimiter is configured, leading
    /// blanks of the accepted line are removed.
    ///
    /// The delimiter never counts as a blank, so with a tab delimiter a line of tabs holds
    /// empty fields and is returned rather than skipped.
    pub fn read_line(&mut self, skip_blank: bool) -> core::result::Result<(), ErrorCode> {
        let tok = &mut self.tokenizer;
        if tok.last_error.is_terminal() {
            return Err(tok.last_error);
        }
        let Some(source) = self.source.as_mut() else {
            return tok.fail(ErrorCode::InvalidatedInstance);
        };
        loop {
            tok.line.clear();
            match source.read_until(b'\n', &mut tok.line) {
                Ok(0) => {
                    trace!(line = self.line_number, "end of input");
                    tok.line.clear();
                    tok.pos = 0;
                    return tok.fail(ErrorCode::EndOfInput);
                }
                Ok(_) => {}
                Err(err) => {
                    debug!(line = self.line_number + 1, error = %err, "read error");
                    tok.line.clear();
                    tok.pos = 0;
                    return tok.fail(ErrorCode::ReadError);
                }
            }
            self.line_number += 1;
            strip_line_ending(&mut tok.line);
            if !skip_blank {
                break;
            }
            let first = tok.line.iter().position(|&b| !tok.is_blank(b));
            match first {
                None => trace!(line = self.line_number, "skipping blank line"),
                Some(i) if tok.options.comment == Some(tok.line[i]) => {
                    trace!(line = self.line_number, "skipping comment line")
                }
                Some(i) => {
                    if tok.options.delimiter.is_none() {
                        tok.line.drain(..i);
                    }
                    break;
                }
            }
        }
        tok.start_line();
        Ok(())
    }

    /// [`read_line`](Self::read_line) skipping blank and comment lines.
    pub fn next_line(&mut self) -> core::result::Result<(), ErrorCode> {
        self.read_line(true)
    }

    /// Moves the reader's whole state into a new value.
    ///
    /// `self` is left in the terminal `InvalidatedInstance` state, so two live readers
    /// never share a source or line buffer.
    pub fn take(&mut self) -> LineReader<R> {
        LineReader {
            tokenizer: self.tokenizer.take(),
            source: self.source.take(),
            line_number: self.line_number,
            source_name: self.source_name.take(),
        }
    }

    /// Gives back the underlying source, if this reader still has one.
    pub fn into_inner(self) -> Option<R> {
        self.source.map(BufReader::into_inner)
    }

    /// Diagnostic for the current state.
    pub fn diagnostic(&self) -> Diagnostic {
        self.tokenizer
            .diagnostic(self.source_name.as_deref(), self.line_number)
    }

    /// Writes the current diagnostic as one line.
    pub fn write_error<W: io::Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "{}", self.diagnostic())?;
        Ok(())
    }

    /// `Ok` unless the last operation failed with something other than end of input.
    pub fn check(&self) -> Result<()> {
        match self.tokenizer.last_error {
            ErrorCode::Ok | ErrorCode::EndOfInput => Ok(()),
            _ => Err(Error::Parse(self.diagnostic())),
        }
    }
}

impl<R> Deref for LineReader<R> {
    type Target = Tokenizer;

    fn deref(&self) -> &Tokenizer {
        &self.tokenizer
    }
}

impl<R> DerefMut for LineReader<R> {
    fn deref_mut(&mut self) -> &mut Tokenizer {
        &mut self.tokenizer
    }
}
