/// Line and field configuration shared by [`Tokenizer`](crate::Tokenizer) and
/// [`LineReader`](crate::LineReader).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Options {
    /// Field delimiter. `None` separates fields by any run of spaces and tabs.
    /// Must not be a newline.
    pub delimiter: Option<u8>,
    /// Marker that ends the useful part of a line.
    pub comment: Option<u8>,
    /// Base for integer conversions: 0 (auto-detect) or 2..=36.
    pub base: u32,
    /// Whether NaN and infinities are accepted by unbounded double reads.
    pub allow_nonfinite: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            delimiter: None,
            comment: None,
            base: 10,
            allow_nonfinite: true,
        }
    }
}

impl Options {
    /// Tab separated fields.
    pub fn tsv() -> Self {
        Self::default().with_delimiter(b'\t')
    }

    /// Comma separated fields (no quoting).
    pub fn csv() -> Self {
        Self::default().with_delimiter(b',')
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_comment(mut self, comment: u8) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn with_base(mut self, base: u32) -> Self {
        self.base = base;
        self
    }

    pub fn with_allow_nonfinite(mut self, allow: bool) -> Self {
        self.allow_nonfinite = allow;
        self
    }
}
