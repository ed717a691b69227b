use clap::Parser;
use muffet_filter::{command, utils};
use std::process::ExitCode;

mod args;
use args::Args;

fn main() -> ExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging, RUST_LOG still takes precedence
    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let raw_report = match utils::read_input(args.input_json.as_deref()) {
        Ok(raw_report) => raw_report,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = args.filter_config();
    match command::run(&raw_report, &config, &mut std::io::stdout().lock()) {
        Ok(true) => ExitCode::SUCCESS,
        // Unresolved links remain and were printed
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            ::log::debug!("Filter run failed: {:?}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
