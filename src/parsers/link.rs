use crate::config::ParseOptions;
use crate::error::{FilterError, Result};
use crate::results::{ErrorLink, LinkResult, SuccessLink};
use serde_json::{Map, Value};

/// Url written in place of an empty error link url in relaxed mode
pub const EMPTY_URL_PLACEHOLDER: &str = "empty";

/// Decode one link object found on `page_url`.
///
/// The presence of a `status` key alone decides the variant. Missing fields
/// decode as empty and are then validated.
pub fn decode(
    object: &Map<String, Value>,
    page_url: &str,
    options: &ParseOptions,
) -> Result<LinkResult> {
    if object.contains_key("status") {
        let link = SuccessLink::new(string_field(object, "url")?, status_field(object)?);
        if let Err(err) = link.validate() {
            if options.verbose {
                ::log::info!(
                    "invalid success link returned by link checker: {}, page: {}",
                    render(object),
                    page_url
                );
            }
            return Err(err);
        }
        return Ok(LinkResult::Success(link));
    }

    let mut link = ErrorLink::new(
        string_field(object, "url")?,
        string_field(object, "error")?,
    );
    if let Err(err) = link.validate() {
        if options.verbose {
            ::log::info!(
                "invalid error link returned by link checker: {}, page: {}",
                render(object),
                page_url
            );
        }

        if !(options.ignore_empty_error_url && link.url.is_empty()) {
            return Err(err);
        }

        if options.verbose {
            ::log::info!(
                "using placeholder url {:?} for error link {:?} on page: {}",
                EMPTY_URL_PLACEHOLDER,
                link.error,
                page_url
            );
        }
        link.url = EMPTY_URL_PLACEHOLDER.to_string();
    }
    Ok(LinkResult::Error(link))
}

pub(crate) fn string_field(object: &Map<String, Value>, key: &str) -> Result<String> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(other) => Err(FilterError::malformed(format!(
            "link field `{}` must be a string, found {}",
            key, other
        ))),
    }
}

pub(crate) fn status_field(object: &Map<String, Value>) -> Result<u16> {
    match object.get("status") {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|status| u16::try_from(status).ok())
            .ok_or_else(|| {
                FilterError::malformed(format!(
                    "link field `status` is not a status code: {}",
                    number
                ))
            }),
        Some(other) => Err(FilterError::malformed(format!(
            "link field `status` must be a number, found {}",
            other
        ))),
    }
}

fn render(object: &Map<String, Value>) -> String {
    serde_json::to_string(object).unwrap_or_else(|_| format!("{:?}", object))
}
