//! Line-buffered source reader
//!
//! The lexer never sees the whole file at once. It asks a [`SourceReader`] for
//! one raw line at a time, which keeps scanning lazy all the way down to I/O.

use std::io::{self, BufRead};

/// Lines longer than this many characters are truncated.
pub const MAX_LINE_LENGTH: usize = 10000;

/// Supplies raw source lines on demand.
pub trait SourceReader {
    /// Returns the next raw line (including its line terminator, if any),
    /// or `None` once the source is exhausted.
    fn next_line(&mut self) -> io::Result<Option<String>>;

    /// 1-based number of the line most recently returned by
    /// [`next_line`](SourceReader::next_line); `0` before the first read.
    fn line_number(&self) -> usize;
}

/// [`SourceReader`] over any buffered byte stream.
pub struct LineReader<R> {
    inner: R,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line_number: 0,
        }
    }
}

impl<'a> LineReader<&'a [u8]> {
    /// Reader over an in-memory source string.
    pub fn from_source(source: &'a str) -> Self {
        Self::new(source.as_bytes())
    }
}

impl<R: BufRead> SourceReader for LineReader<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.inner.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        if let Some((cut, _)) = line.char_indices().nth(MAX_LINE_LENGTH) {
            line.truncate(cut);
        }

        Ok(Some(line))
    }

    fn line_number(&self) -> usize {
        self.line_number
    }
}
