use std::fmt;
use thiserror::Error;

/// Required link fields checked during validation, in the order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    Url,
    Status,
    Error,
}

impl fmt::Display for LinkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkField::Url => "Url",
            LinkField::Status => "Status",
            LinkField::Error => "Error",
        };
        f.write_str(name)
    }
}

/// The two link shapes a link checker reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkVariant {
    Success,
    Error,
}

impl fmt::Display for LinkVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkVariant::Success => "SuccessLink",
            LinkVariant::Error => "ErrorLink",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while parsing, filtering or loading ignore rules
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("malformed report: {0}")]
    MalformedInput(String),

    #[error("missing required field: '{field}' for type: {variant}, {link}")]
    MissingField {
        field: LinkField,
        variant: LinkVariant,
        link: String,
    },

    #[error("unexpected link entry in report: {0}")]
    UnknownLinkVariant(String),

    #[error("failed to load ignore list {path}: {reason}")]
    IgnoreList { path: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilterError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        FilterError::MalformedInput(message.into())
    }

    pub(crate) fn missing_field(
        field: LinkField,
        variant: LinkVariant,
        link: &impl fmt::Debug,
    ) -> Self {
        FilterError::MissingField {
            field,
            variant,
            link: format!("{:?}", link),
        }
    }
}

/// Result type for report operations
pub type Result<T> = std::result::Result<T, FilterError>;
