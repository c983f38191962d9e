//! Quote-aware CSV codec.
//!
//! [`parse_csv`] never fails: recoverable anomalies (a quote left open at end of input, stray
//! characters after a closing quote, ragged rows) are returned as [`ParseWarning`]s next to
//! the best-effort grid, and an unusable dialect yields the one-cell grid with
//! [`ParseOutput::failed`] set. [`try_parse_csv`] is the strict variant.
//!
//! [`unparse_csv`] quotes only the cells that need it, so for any normalized grid `G`:
//!
//! ```rust
//! use table_core::{ParseConfig, normalize_table_data, parse_csv, unparse_csv};
//!
//! let grid = normalize_table_data(&[
//!     vec!["name".into(), "note".into()],
//!     vec!["Alice \"A\"".into(), "one, two\nthree".into()],
//! ]);
//! let config = ParseConfig::default();
//! let text = unparse_csv(&grid, &config);
//! assert_eq!(normalize_table_data(&parse_csv(&text, &config).grid), grid);
//! ```

use crate::config::{ParseConfig, validate_dialect};
use crate::dialect::DEFAULT_DELIMITER;
use crate::error::ParseError;
use crate::grid::{Grid, empty_grid, normalize_table_data};
use std::fmt;

/// Kinds of recoverable parse anomalies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseWarningKind {
    /// Input ended inside a quoted field; the field runs to the end of input.
    UnterminatedQuote,
    /// Characters followed a closing quote before the next delimiter; they were kept.
    InvalidQuotes,
    /// A record has a different number of fields than the first record.
    FieldCountMismatch,
}

/// A recoverable anomaly found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// What went wrong.
    pub kind: ParseWarningKind,
    /// Human-readable description.
    pub message: String,
    /// Zero-based record index the anomaly belongs to.
    pub row: usize,
    /// Approximate character offset in the input.
    pub position: usize,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (row {}, offset {})", self.message, self.row + 1, self.position)
    }
}

/// Result of parsing delimited text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    /// Parsed records, not yet normalized (rows may differ in length, and may be empty).
    pub grid: Grid,
    /// The delimiter actually used (resolved when the configuration asked for auto-detection).
    pub delimiter: char,
    /// Recoverable anomalies, in input order.
    pub warnings: Vec<ParseWarning>,
    /// `true` if the input could not be tokenized at all and `grid` is the fallback `[[""]]`.
    pub failed: bool,
}

impl ParseOutput {
    fn failure(delimiter: char) -> Self {
        Self {
            grid: empty_grid(),
            delimiter,
            warnings: Vec::new(),
            failed: true,
        }
    }

    /// Returns the first warning, if any (what a status line would show).
    pub fn first_warning(&self) -> Option<&ParseWarning> {
        self.warnings.first()
    }
}

/// Parse `text` into records, returning an error only for an unusable dialect.
pub fn try_parse_csv(text: &str, config: &ParseConfig) -> Result<ParseOutput, ParseError> {
    let delimiter = config.resolve_delimiter(text);
    parse_with_delimiter(text, delimiter, config)
}

/// Parse `text` into records.
///
/// Never fails: on an unusable dialect this logs the error and returns the one-cell grid
/// with [`ParseOutput::failed`] set.
pub fn parse_csv(text: &str, config: &ParseConfig) -> ParseOutput {
    let delimiter = config.resolve_delimiter(text);
    match parse_with_delimiter(text, delimiter, config) {
        Ok(output) => output,
        Err(err) => {
            tracing::error!(%err, "CSV parsing failed");
            ParseOutput::failure(delimiter)
        }
    }
}

/// [`parse_csv`] followed by [`normalize_table_data`].
pub fn parse_table(text: &str, config: &ParseConfig) -> ParseOutput {
    let mut output = parse_csv(text, config);
    output.grid = normalize_table_data(&output.grid);
    output
}

fn parse_with_delimiter(
    text: &str,
    delimiter: char,
    config: &ParseConfig,
) -> Result<ParseOutput, ParseError> {
    validate_dialect(delimiter, config.quote_char)?;

    let mut parser = RecordParser::new(text, delimiter, config);
    parser.run();

    for warning in &parser.warnings {
        tracing::warn!(
            row = warning.row,
            position = warning.position,
            "{}",
            warning.message
        );
    }

    Ok(ParseOutput {
        grid: parser.records,
        delimiter,
        warnings: parser.warnings,
        failed: false,
    })
}

struct RecordParser<'a> {
    chars: Vec<char>,
    pos: usize,
    delimiter: char,
    quote: char,
    escape: char,
    config: &'a ParseConfig,
    records: Grid,
    record: Vec<String>,
    field: String,
    /// Index of the record being built, counting records dropped by `skip_empty_lines`.
    row: usize,
    expected_fields: Option<usize>,
    warnings: Vec<ParseWarning>,
}

impl<'a> RecordParser<'a> {
    fn new(text: &str, delimiter: char, config: &'a ParseConfig) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            delimiter,
            quote: config.quote_char,
            escape: config.escape_char,
            config,
            records: Vec::new(),
            record: Vec::new(),
            field: String::new(),
            row: 0,
            expected_fields: None,
            warnings: Vec::new(),
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn warn(&mut self, kind: ParseWarningKind, position: usize, message: impl Into<String>) {
        self.warnings.push(ParseWarning {
            kind,
            message: message.into(),
            row: self.row,
            position,
        });
    }

    fn run(&mut self) {
        if self.chars.is_empty() {
            return;
        }

        let mut at_field_start = true;
        // Whether anything has been read since the last record terminator.
        let mut record_open = false;

        while let Some(ch) = self.peek(0) {
            record_open = true;

            if at_field_start && ch == self.quote {
                self.read_quoted_field();
                at_field_start = false;
                continue;
            }

            if ch == self.delimiter {
                self.record.push(std::mem::take(&mut self.field));
                at_field_start = true;
                self.pos += 1;
                continue;
            }

            if ch == '\n' || ch == '\r' {
                if ch == '\r' && self.peek(1) == Some('\n') {
                    self.pos += 1;
                }
                self.pos += 1;
                self.finish_record();
                at_field_start = true;
                record_open = false;
                continue;
            }

            self.field.push(ch);
            at_field_start = false;
            self.pos += 1;
        }

        if record_open {
            self.finish_record();
        }
    }

    /// Read a quoted field starting at the opening quote, plus anything up to the next
    /// delimiter or line break.
    fn read_quoted_field(&mut self) {
        let open = self.pos;
        self.pos += 1;
        let mut closed = false;

        while let Some(ch) = self.peek(0) {
            if self.escape != self.quote && ch == self.escape {
                if let Some(next) = self.peek(1).filter(|&n| n == self.quote || n == self.escape) {
                    self.field.push(next);
                    self.pos += 2;
                    continue;
                }
            }

            if ch == self.quote {
                if self.peek(1) == Some(self.quote) {
                    self.field.push(self.quote);
                    self.pos += 2;
                    continue;
                }
                self.pos += 1;
                closed = true;
                break;
            }

            self.field.push(ch);
            self.pos += 1;
        }

        if !closed {
            self.warn(
                ParseWarningKind::UnterminatedQuote,
                open,
                "Quoted field unterminated",
            );
            return;
        }

        let stray_start = self.pos;
        while let Some(ch) = self.peek(0) {
            if ch == self.delimiter || ch == '\n' || ch == '\r' {
                break;
            }
            self.field.push(ch);
            self.pos += 1;
        }
        if self.pos > stray_start {
            self.warn(
                ParseWarningKind::InvalidQuotes,
                stray_start,
                "Trailing characters after closing quote",
            );
        }
    }

    fn finish_record(&mut self) {
        self.record.push(std::mem::take(&mut self.field));
        let record = std::mem::take(&mut self.record);

        if self.config.skip_empty_lines && record.iter().all(|cell| cell.trim().is_empty()) {
            self.row += 1;
            return;
        }

        match self.expected_fields {
            None => self.expected_fields = Some(record.len()),
            Some(expected) if expected != record.len() => {
                let message = if record.len() < expected {
                    format!("Too few fields: expected {expected} fields but parsed {}", record.len())
                } else {
                    format!("Too many fields: expected {expected} fields but parsed {}", record.len())
                };
                self.warn(ParseWarningKind::FieldCountMismatch, self.pos, message);
            }
            Some(_) => {}
        }

        self.records.push(record);
        self.row += 1;
    }
}

/// Serialize `grid` as delimited text.
///
/// Rows are joined with `\n`. A cell is quoted when it contains the delimiter, the quote
/// character, a line break, or leading/trailing whitespace. An [`crate::Delimiter::Auto`]
/// preference writes commas.
pub fn unparse_csv(grid: &[Vec<String>], config: &ParseConfig) -> String {
    let delimiter = config.delimiter.as_char().unwrap_or(DEFAULT_DELIMITER);
    let writer = CellWriter {
        delimiter,
        quote: config.quote_char,
        escape: config.escape_char,
    };

    let mut out = String::new();
    for (i, row) in grid.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        writer.write_row(&mut out, row);
    }
    out
}

struct CellWriter {
    delimiter: char,
    quote: char,
    escape: char,
}

impl CellWriter {
    fn write_row(&self, out: &mut String, row: &[String]) {
        // A lone empty cell would otherwise be an empty line.
        if let [cell] = row
            && cell.is_empty()
        {
            out.push(self.quote);
            out.push(self.quote);
            return;
        }

        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push(self.delimiter);
            }
            self.write_cell(out, cell);
        }
    }

    fn needs_quotes(&self, cell: &str) -> bool {
        cell.chars()
            .any(|ch| ch == self.delimiter || ch == self.quote || ch == '\n' || ch == '\r')
            || cell.starts_with(char::is_whitespace)
            || cell.ends_with(char::is_whitespace)
    }

    fn write_cell(&self, out: &mut String, cell: &str) {
        if !self.needs_quotes(cell) {
            out.push_str(cell);
            return;
        }

        out.push(self.quote);
        for ch in cell.chars() {
            if ch == self.quote {
                out.push(self.escape);
            } else if ch == self.escape {
                out.push(self.escape);
            }
            out.push(ch);
        }
        out.push(self.quote);
    }
}
