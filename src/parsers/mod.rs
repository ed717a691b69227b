pub mod link;


use crate::config::ParseOptions;
use crate::error::{FilterError, Result};
use crate::results::{PageResult, Report};
use serde::Deserialize;
use serde_json::{Map, Value};

/// A page entry as it appears in the link checker output, links still untyped
#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    url: Option<String>,

    #[serde(default)]
    links: Option<Vec<Map<String, Value>>>,
}

/// Parse the JSON output of a link checker into a validated [`Report`].
///
/// The input must be a JSON array of `{"url": ..., "links": [...]}` objects.
/// Pages and links keep their input order. Any malformed page or invalid link
/// fails the whole report.
pub fn parse_report(raw: &str, options: &ParseOptions) -> Result<Report> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| FilterError::malformed(e.to_string()))?;

    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            return Err(FilterError::malformed(format!(
                "expected an array of pages, found {}",
                kind(&other)
            )));
        }
    };

    let mut pages = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        // Derived deserializers also accept sequences, so only objects get this far
        let object = match entry {
            Value::Object(object) => object,
            other => {
                return Err(FilterError::malformed(format!(
                    "page {}: expected an object, found {}",
                    index,
                    kind(&other)
                )));
            }
        };
        let page: RawPage = serde_json::from_value(Value::Object(object))
            .map_err(|e| FilterError::malformed(format!("page {}: {}", index, e)))?;

        let url = page.url.unwrap_or_default();
        let objects = page.links.unwrap_or_default();

        let mut links = Vec::with_capacity(objects.len());
        for object in &objects {
            links.push(link::decode(object, &url, options)?);
        }

        ::log::debug!("Parsed page {} with {} links", url, links.len());
        pages.push(PageResult::new(url, links));
    }

    Ok(Report::new(pages))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
