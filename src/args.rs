use clap::Parser;
use muffet_filter::FilterConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "muffet-filter")]
#[command(about = "Removes ignored errors from a muffet JSON link check report")]
#[command(version)]
pub struct Args {
    /// Path to the link checker output in JSON format (reads stdin when omitted)
    #[arg(short = 'j', long)]
    pub input_json: Option<PathBuf>,

    /// File containing url errors to ignore in JSON format.
    /// Defaults: .muffet-filter/ignores.json, ~/.muffet-filter/ignores.json
    #[arg(short, long)]
    pub ignores: Option<PathBuf>,

    /// Show more output
    #[arg(short, long)]
    pub verbose: bool,

    /// Accept error links with an empty url instead of failing
    #[arg(long)]
    pub ignore_empty_err_url: bool,
}

impl Args {
    /// Convert the command line into a filter configuration
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            ignores_path: self.ignores.clone(),
            verbose: self.verbose,
            ignore_empty_error_url: self.ignore_empty_err_url,
            ..FilterConfig::default()
        }
    }
}
