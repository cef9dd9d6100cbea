/*!
# Dialect Configuration

Options forwarded to the underlying `csv` reader and writer. The mapped
reader always disables the codec's own header handling, since the header row
is consumed here to build the field-index mapping.
*/

use csv::{ReaderBuilder, Terminator, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};

/// Dialect options shared by [`crate::MapReader`] and [`crate::MapWriter`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MapCsvConfig {
    /// Field separator
    pub delimiter: u8,

    /// Quote character
    pub quote: u8,

    /// Lines starting with this byte are skipped when reading
    pub comment: Option<u8>,

    /// Allow rows whose column count differs from the header
    pub flexible: bool,

    /// Trim leading and trailing whitespace from cells when reading
    pub trim: bool,

    /// Terminate written rows with `\r\n` instead of `\n`
    pub crlf: bool,
}

impl Default for MapCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            comment: None,
            flexible: false,
            trim: false,
            crlf: false,
        }
    }
}

impl MapCsvConfig {
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    pub fn comment(mut self, comment: Option<u8>) -> Self {
        self.comment = comment;
        self
    }

    pub fn flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }

    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn crlf(mut self, crlf: bool) -> Self {
        self.crlf = crlf;
        self
    }

    /// Reader builder for this dialect with header handling turned off
    pub fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(false)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .comment(self.comment)
            .flexible(self.flexible)
            .trim(if self.trim { Trim::All } else { Trim::None });
        builder
    }

    pub fn writer_builder(&self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder
            .has_headers(false)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .flexible(self.flexible)
            .terminator(if self.crlf {
                Terminator::CRLF
            } else {
                Terminator::Any(b'\n')
            });
        builder
    }
}
