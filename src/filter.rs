use crate::error::{FilterError, Result};
use crate::results::{ErrorLink, LinkResult, PageResult, Report};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// An error link to suppress from a report.
///
/// Each field is compared exactly first and, failing that, used as a regex
/// searched for in the link's field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreRule {
    /// Exact url or url pattern
    #[serde(default)]
    pub url: String,

    /// Exact error or error pattern
    #[serde(default)]
    pub error: String,
}

impl IgnoreRule {
    pub fn new(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            error: error.into(),
        }
    }
}

impl From<ErrorLink> for IgnoreRule {
    fn from(link: ErrorLink) -> Self {
        Self {
            url: link.url,
            error: link.error,
        }
    }
}

/// A rule with its patterns compiled. Patterns that are not valid regexes
/// are `None` and never match.
#[derive(Debug)]
struct CompiledRule {
    rule: IgnoreRule,
    url_regex: Option<Regex>,
    error_regex: Option<Regex>,
}

impl CompiledRule {
    fn new(rule: IgnoreRule) -> Self {
        let url_regex = compile_pattern(&rule.url);
        let error_regex = compile_pattern(&rule.error);
        Self {
            rule,
            url_regex,
            error_regex,
        }
    }

    fn matches(&self, link: &ErrorLink) -> bool {
        if link.url != self.rule.url && !pattern_matches(&self.url_regex, &link.url) {
            return false;
        }

        link.error == self.rule.error || pattern_matches(&self.error_regex, &link.error)
    }
}

fn compile_pattern(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            ::log::debug!(
                "Ignore pattern {:?} is not a valid regex, only exact matches apply: {}",
                pattern,
                e
            );
            None
        }
    }
}

fn pattern_matches(regex: &Option<Regex>, value: &str) -> bool {
    regex.as_ref().is_some_and(|regex| regex.is_match(value))
}

/// Removes ignored error links from reports
#[derive(Debug)]
pub struct IgnoreFilter {
    rules: Vec<CompiledRule>,
    verbose: bool,
}

impl Default for IgnoreFilter {
    fn default() -> Self {
        Self::new(Vec::new(), false)
    }
}

impl IgnoreFilter {
    /// Create a filter from rules, kept in the given order
    pub fn new(rules: Vec<IgnoreRule>, verbose: bool) -> Self {
        Self {
            rules: rules.into_iter().map(CompiledRule::new).collect(),
            verbose,
        }
    }

    /// The first rule matching an error link, if any
    pub fn matching_rule(&self, link: &ErrorLink) -> Option<&IgnoreRule> {
        self.rules
            .iter()
            .find(|compiled| compiled.matches(link))
            .map(|compiled| &compiled.rule)
    }

    /// Whether any rule ignores the error link
    pub fn is_ignored(&self, link: &ErrorLink) -> bool {
        self.matching_rule(link).is_some()
    }

    /// Build a new report without ignored error links.
    ///
    /// Success links are always kept and pages left without links are dropped.
    /// Fails without returning a partial report if an entry is neither a
    /// success nor an error link.
    pub fn apply(&self, report: &Report) -> Result<Report> {
        let mut pages = Vec::with_capacity(report.len());

        for page in report.pages() {
            let mut links = Vec::with_capacity(page.links.len());

            for link in &page.links {
                match link {
                    LinkResult::Success(_) => links.push(link.clone()),
                    LinkResult::Error(error_link) => match self.matching_rule(error_link) {
                        Some(rule) => {
                            if self.verbose {
                                ::log::info!(
                                    "skipping error link {:?} on page: {} (rule {:?})",
                                    error_link,
                                    page.url,
                                    rule
                                );
                            }
                        }
                        None => links.push(link.clone()),
                    },
                    LinkResult::Unrecognized(value) => {
                        return Err(FilterError::UnknownLinkVariant(format!(
                            "{} on page: {}",
                            value, page.url
                        )));
                    }
                }
            }

            if !links.is_empty() {
                pages.push(PageResult::new(page.url.clone(), links));
            }
        }

        ::log::debug!(
            "Filtered report from {} to {} pages",
            report.len(),
            pages.len()
        );
        Ok(Report::new(pages))
    }
}

/// Filter a report with a one-off set of rules
pub fn filter_report(report: &Report, rules: &[IgnoreRule], verbose: bool) -> Result<Report> {
    IgnoreFilter::new(rules.to_vec(), verbose).apply(report)
}
