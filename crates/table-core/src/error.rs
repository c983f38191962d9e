use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// A dialect that cannot tokenize any input.
///
/// This is the only failure [`crate::codec::try_parse_csv`] can report; every other anomaly is
/// recovered from and surfaced as a [`crate::ParseWarning`].
pub enum ParseError {
    #[error("delimiter {0:?} is the same as the quote character")]
    /// The delimiter and the quote character are identical.
    DelimiterIsQuote(char),

    #[error("{0:?} cannot be used as a delimiter")]
    /// Line breaks cannot separate fields.
    InvalidDelimiter(char),

    #[error("{0:?} cannot be used as a quote character")]
    /// Line breaks cannot quote fields.
    InvalidQuote(char),
}

#[derive(Debug, Error)]
/// Errors produced while loading a [`crate::ParseConfig`] from user settings.
pub enum ConfigError {
    #[error("invalid settings JSON: {0}")]
    /// The settings document is not valid JSON for a parse configuration.
    Json(#[from] serde_json::Error),

    #[error("invalid dialect: {0}")]
    /// The settings describe a dialect that cannot be parsed.
    Dialect(#[from] ParseError),
}
