// Re-export modules
pub mod command;
pub mod config;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod utils;

#[cfg(test)]
mod test_logger;

// Re-export commonly used types for convenience
pub use config::{FilterConfig, ParseOptions};
pub use error::{FilterError, LinkField, LinkVariant, Result};
pub use filter::{IgnoreFilter, IgnoreRule, filter_report};
pub use parsers::parse_report;
pub use results::{ErrorLink, LinkResult, PageResult, Report, SuccessLink};
