use crate::error::{FilterError, LinkField, LinkVariant, Result};
use crate::parsers::link::{status_field, string_field};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A link that the link checker fetched successfully
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessLink {
    /// URL of the link
    pub url: String,

    /// Status code returned when fetching the link
    pub status: u16,
}

impl SuccessLink {
    pub fn new(url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            status,
        }
    }

    /// Check that the url is set and the status is non-zero
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            Err(FilterError::missing_field(
                LinkField::Url,
                LinkVariant::Success,
                self,
            ))
        } else if self.status == 0 {
            Err(FilterError::missing_field(
                LinkField::Status,
                LinkVariant::Success,
                self,
            ))
        } else {
            Ok(())
        }
    }
}

/// A link that the link checker reported as broken
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLink {
    /// URL of the link
    pub url: String,

    /// Human readable failure, e.g. "404" or "id #top not found"
    pub error: String,
}

impl ErrorLink {
    pub fn new(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            error: error.into(),
        }
    }

    /// Check that both the url and the error are set
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            Err(FilterError::missing_field(
                LinkField::Url,
                LinkVariant::Error,
                self,
            ))
        } else if self.error.is_empty() {
            Err(FilterError::missing_field(
                LinkField::Error,
                LinkVariant::Error,
                self,
            ))
        } else {
            Ok(())
        }
    }
}

/// One link found on a page.
///
/// Serializes to exactly the object the link checker emitted. When a report is
/// deserialized through serde rather than [`crate::parsers::parse_report`],
/// entries that fit neither shape are kept as `Unrecognized` so that the
/// filter can refuse them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LinkResult {
    Success(SuccessLink),
    Error(ErrorLink),
    Unrecognized(Value),
}

impl<'de> Deserialize<'de> for LinkResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(LinkResult::from_value)
    }
}

impl LinkResult {
    /// Classify a link without validating it.
    ///
    /// A `status` key makes it a success link, otherwise it needs an `error`
    /// key. Entries whose fields do not decode for that shape are unrecognized.
    pub fn from_value(value: Value) -> Self {
        if let Value::Object(object) = &value {
            if let Some(link) = classify(object) {
                return link;
            }
        }
        LinkResult::Unrecognized(value)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LinkResult::Error(_))
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            LinkResult::Success(link) => Some(&link.url),
            LinkResult::Error(link) => Some(&link.url),
            LinkResult::Unrecognized(_) => None,
        }
    }
}

fn classify(object: &Map<String, Value>) -> Option<LinkResult> {
    if !object.contains_key("url") {
        return None;
    }
    let url = string_field(object, "url").ok()?;

    if object.contains_key("status") {
        let status = status_field(object).ok()?;
        Some(LinkResult::Success(SuccessLink::new(url, status)))
    } else if object.contains_key("error") {
        let error = string_field(object, "error").ok()?;
        Some(LinkResult::Error(ErrorLink::new(url, error)))
    } else {
        None
    }
}

impl From<SuccessLink> for LinkResult {
    fn from(link: SuccessLink) -> Self {
        LinkResult::Success(link)
    }
}

impl From<ErrorLink> for LinkResult {
    fn from(link: ErrorLink) -> Self {
        LinkResult::Error(link)
    }
}

/// A scanned page and the links found on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// URL of the page
    #[serde(default)]
    pub url: String,

    /// Links found on the page, in crawl order
    #[serde(default)]
    pub links: Vec<LinkResult>,
}

impl PageResult {
    /// Create a new page result instance
    pub fn new(url: impl Into<String>, links: Vec<LinkResult>) -> Self {
        Self {
            url: url.into(),
            links,
        }
    }
}

/// A full link check, one entry per scanned page in crawl order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    pages: Vec<PageResult>,
}

impl Report {
    pub fn new(pages: Vec<PageResult>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[PageResult] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<PageResult> {
        self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Whether any page still carries an error link
    pub fn has_errors(&self) -> bool {
        self.pages
            .iter()
            .any(|page| page.links.iter().any(LinkResult::is_error))
    }

    /// Total number of error links across all pages
    pub fn error_count(&self) -> usize {
        self.pages
            .iter()
            .map(|page| page.links.iter().filter(|link| link.is_error()).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_link_validate() {
        let bad_link = SuccessLink::new("", 500);
        let err = bad_link.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required field: 'Url' for type: SuccessLink, SuccessLink { url: \"\", status: 500 }"
        );

        let bad_link = SuccessLink::new("myUrl", 0);
        assert!(matches!(
            bad_link.validate(),
            Err(FilterError::MissingField {
                field: LinkField::Status,
                variant: LinkVariant::Success,
                ..
            })
        ));

        // Url is checked before status
        let bad_link = SuccessLink::new("", 0);
        assert!(matches!(
            bad_link.validate(),
            Err(FilterError::MissingField {
                field: LinkField::Url,
                ..
            })
        ));

        assert!(SuccessLink::new("myUrl", 200).validate().is_ok());
    }

    #[test]
    fn test_error_link_validate() {
        let bad_link = ErrorLink::new("", "myError");
        assert!(matches!(
            bad_link.validate(),
            Err(FilterError::MissingField {
                field: LinkField::Url,
                variant: LinkVariant::Error,
                ..
            })
        ));

        let bad_link = ErrorLink::new("myUrl", "");
        assert!(matches!(
            bad_link.validate(),
            Err(FilterError::MissingField {
                field: LinkField::Error,
                variant: LinkVariant::Error,
                ..
            })
        ));

        let bad_link = ErrorLink::new("", "");
        assert_eq!(
            bad_link.validate().unwrap_err().to_string(),
            "missing required field: 'Url' for type: ErrorLink, ErrorLink { url: \"\", error: \"\" }"
        );
    }

    #[test]
    fn test_report_serializes_to_checker_shape() {
        let report = Report::new(vec![PageResult::new(
            "https://a/",
            vec![
                SuccessLink::new("https://a/style.css", 200).into(),
                ErrorLink::new("https://a/#x", "id #x not found").into(),
            ],
        )]);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "url": "https://a/",
                "links": [
                    {"url": "https://a/style.css", "status": 200},
                    {"url": "https://a/#x", "error": "id #x not found"}
                ]
            }])
        );
    }

    #[test]
    fn test_lenient_deserialize_keeps_unknown_entries() {
        let json = r#"[{"url": "https://a/", "links": [
            {"url": "https://a/ok", "status": 200, "error": "ignored"},
            {"url": "https://a/bad", "error": "404"},
            {"href": "https://a/?"}
        ]}]"#;
        let report: Report = serde_json::from_str(json).unwrap();
        let links = &report.pages()[0].links;

        assert_eq!(links[0], LinkResult::Success(SuccessLink::new("https://a/ok", 200)));
        assert_eq!(links[1], LinkResult::Error(ErrorLink::new("https://a/bad", "404")));
        assert!(matches!(links[2], LinkResult::Unrecognized(_)));
        assert_eq!(links[2].url(), None);
    }

    #[test]
    fn test_lenient_deserialize_honours_status_key() {
        let json = r#"[{"url": "p", "links": [
            {"url": "u", "status": "bad", "error": "e"},
            {"url": "u", "status": -1},
            "https://a/",
            {"url": "u", "error": 404}
        ]}]"#;
        let report: Report = serde_json::from_str(json).unwrap();

        // A status key never falls back to the error shape
        let links = &report.pages()[0].links;
        assert_eq!(links.len(), 4);
        for link in links {
            assert!(matches!(link, LinkResult::Unrecognized(_)), "{:?}", link);
        }
        assert_eq!(
            links[0],
            LinkResult::Unrecognized(serde_json::json!({"url": "u", "status": "bad", "error": "e"}))
        );
    }

    #[test]
    fn test_has_errors() {
        let only_success = Report::new(vec![PageResult::new(
            "https://a/",
            vec![SuccessLink::new("https://a/ok", 200).into()],
        )]);
        assert!(!only_success.has_errors());
        assert_eq!(only_success.error_count(), 0);

        let with_error = Report::new(vec![
            PageResult::new("https://a/", vec![SuccessLink::new("https://a/ok", 200).into()]),
            PageResult::new("https://b/", vec![ErrorLink::new("https://b/x", "404").into()]),
        ]);
        assert!(with_error.has_errors());
        assert_eq!(with_error.error_count(), 1);
        assert!(Report::default().is_empty());
    }
}
