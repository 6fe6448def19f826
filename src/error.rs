//! Error types

/// Markup that breaks a structural assumption of the parser
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedMarkup {
    #[error("failed to locate the lemma element in the inflection tab")]
    MissingLemmaElement,
    #[error("lemma markup {markup:?} does not match the lemma pattern")]
    UnmatchedLemma { markup: String },
    #[error("unassigned table cell at row {row}, column {column}")]
    UnassignedCell { row: usize, column: usize },
    #[error("row {row} left {remaining} column(s) unfilled")]
    UnconsumedColumns { row: usize, remaining: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed markup: {0}")]
    Malformed(#[from] MalformedMarkup),
    #[error("strict matching requires a target word")]
    MissingWord,
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP request failed: {0}")]
    Agent(#[from] Box<ureq::Error>),
    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),
}

impl From<ureq::Error> for Error {
    fn from(error: ureq::Error) -> Self {
        Self::Agent(Box::new(error))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
