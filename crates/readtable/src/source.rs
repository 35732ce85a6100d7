//! Adapter for byte sources exposed as a bare pull function.

use std::fmt;
use std::io::{self, Read};

/// Wraps a function that fills a buffer with up to `buf.len()` bytes and returns how many
/// it wrote.
///
/// A return of 0 ends the input. This contract cannot tell exhaustion apart from a
/// failure; sources that can report errors should implement [`Read`] directly so that
/// failures surface as `ReadError`.
pub struct PullSource<F> {
    pull: F,
    done: bool,
}

impl<F: FnMut(&mut [u8]) -> usize> PullSource<F> {
    pub fn new(pull: F) -> Self {
        Self { pull, done: false }
    }
}

impl<F: FnMut(&mut [u8]) -> usize> Read for PullSource<F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.done || buf.is_empty() {
            return Ok(0);
        }
        let n = (self.pull)(buf).min(buf.len());
        if n == 0 {
            self.done = true;
        }
        Ok(n)
    }
}

impl<F> fmt::Debug for PullSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullSource").field("done", &self.done).finish_non_exhaustive()
    }
}
