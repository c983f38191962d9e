//! Parse configuration.
//!
//! [`ParseConfig`] is a plain value built once per opened document: defaults are applied at
//! construction (or while deserializing user settings) and are never re-merged per call.

use crate::dialect::{DEFAULT_DELIMITER, detect_delimiter};
use crate::error::{ConfigError, ParseError};
use serde::{Deserialize, Serialize};

/// Field delimiter preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Delimiter {
    /// Sniff the delimiter from the text being parsed.
    Auto,
    /// Use this exact character.
    Char(char),
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::Char(DEFAULT_DELIMITER)
    }
}

impl Delimiter {
    /// Interpret a user-entered settings value.
    ///
    /// Empty input and `auto` (any case) select [`Delimiter::Auto`]; the two-character escape
    /// `\t` selects a tab; anything else uses its first character.
    pub fn from_setting(value: &str) -> Self {
        if value.eq_ignore_ascii_case("auto") {
            return Self::Auto;
        }
        if value == "\\t" {
            return Self::Char('\t');
        }
        value.chars().next().map_or(Self::Auto, Self::Char)
    }

    /// The settings string for this delimiter (inverse of [`Delimiter::from_setting`]).
    pub fn as_setting(self) -> String {
        match self {
            Self::Auto => "auto".to_string(),
            Self::Char('\t') => "\\t".to_string(),
            Self::Char(ch) => ch.to_string(),
        }
    }

    /// The pinned character, or `None` for [`Delimiter::Auto`].
    pub fn as_char(self) -> Option<char> {
        match self {
            Self::Auto => None,
            Self::Char(ch) => Some(ch),
        }
    }
}

impl From<char> for Delimiter {
    fn from(ch: char) -> Self {
        Self::Char(ch)
    }
}

impl From<String> for Delimiter {
    fn from(value: String) -> Self {
        Self::from_setting(&value)
    }
}

impl From<Delimiter> for String {
    fn from(delimiter: Delimiter) -> Self {
        delimiter.as_setting()
    }
}

/// Options controlling how delimited text maps to a grid.
///
/// Field names serialize in camelCase so existing settings files load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawParseConfig", rename_all = "camelCase")]
pub struct ParseConfig {
    /// Whether the first row is a header. Informational only; it never changes parsing.
    pub header: bool,
    /// Kept for settings compatibility. Cells are always strings.
    pub dynamic_typing: bool,
    /// Drop records whose cells are all empty after trimming.
    pub skip_empty_lines: bool,
    /// Field delimiter (or [`Delimiter::Auto`]).
    pub delimiter: Delimiter,
    /// Character wrapping fields that contain special characters.
    pub quote_char: char,
    /// Character escaping a quote inside a quoted field.
    ///
    /// Equal to `quote_char` for the usual doubled-quote escaping.
    pub escape_char: char,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            header: false,
            dynamic_typing: false,
            skip_empty_lines: false,
            delimiter: Delimiter::default(),
            quote_char: '"',
            escape_char: '"',
        }
    }
}

impl ParseConfig {
    /// Load a configuration from a JSON settings document and validate it.
    ///
    /// Missing fields take their defaults; a missing `escapeChar` follows `quoteChar`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize this configuration as a JSON settings document.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Return a copy with a different delimiter preference.
    pub fn with_delimiter(mut self, delimiter: impl Into<Delimiter>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Return a copy with a different quote character.
    ///
    /// The escape character is reset to the new quote character.
    pub fn with_quote_char(mut self, quote_char: char) -> Self {
        self.quote_char = quote_char;
        self.escape_char = quote_char;
        self
    }

    /// Return a copy with a different escape character.
    pub fn with_escape_char(mut self, escape_char: char) -> Self {
        self.escape_char = escape_char;
        self
    }

    /// Return a copy with `skip_empty_lines` set.
    pub fn with_skip_empty_lines(mut self, skip: bool) -> Self {
        self.skip_empty_lines = skip;
        self
    }

    /// Resolve the delimiter to use for `text`, sniffing it if the preference is `Auto`.
    pub fn resolve_delimiter(&self, text: &str) -> char {
        self.delimiter
            .as_char()
            .unwrap_or_else(|| detect_delimiter(text, self.quote_char))
    }

    /// Check that the pinned parts of this dialect can tokenize input.
    pub fn validate(&self) -> Result<(), ParseError> {
        match self.delimiter.as_char() {
            Some(delimiter) => validate_dialect(delimiter, self.quote_char),
            None => validate_dialect(DEFAULT_DELIMITER, self.quote_char),
        }
    }
}

pub(crate) fn validate_dialect(delimiter: char, quote_char: char) -> Result<(), ParseError> {
    if matches!(quote_char, '\n' | '\r') {
        return Err(ParseError::InvalidQuote(quote_char));
    }
    if matches!(delimiter, '\n' | '\r') {
        return Err(ParseError::InvalidDelimiter(delimiter));
    }
    if delimiter == quote_char {
        return Err(ParseError::DelimiterIsQuote(delimiter));
    }
    Ok(())
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawParseConfig {
    header: bool,
    dynamic_typing: bool,
    skip_empty_lines: bool,
    delimiter: Option<String>,
    quote_char: Option<char>,
    escape_char: Option<char>,
}

impl From<RawParseConfig> for ParseConfig {
    fn from(raw: RawParseConfig) -> Self {
        let defaults = ParseConfig::default();
        let quote_char = raw.quote_char.unwrap_or(defaults.quote_char);
        Self {
            header: raw.header,
            dynamic_typing: raw.dynamic_typing,
            skip_empty_lines: raw.skip_empty_lines,
            delimiter: raw
                .delimiter
                .map(Delimiter::from)
                .unwrap_or(defaults.delimiter),
            quote_char,
            escape_char: raw.escape_char.unwrap_or(quote_char),
        }
    }
}
