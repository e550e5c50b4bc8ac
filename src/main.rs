// ramprobe - Main entry point

use ramprobe::config::{Args, Config};
use ramprobe::probe;
use std::process;

/// Setup logging based on configuration.
/// Logs go to stderr; stdout carries only the JSON snapshot.
fn setup_logging(debug: bool) {
    let log_level = if debug { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_secs()
        .init();
}

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Initialize logging based on debug flag
    setup_logging(args.debug);

    // Create configuration from arguments and environment
    let config = match Config::from_args(args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(1);
        }
    };

    // Run one probe; sampler or lister failures are fatal
    let result = match probe::run(config) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Fatal error: {e:#}");
            process::exit(1);
        }
    };

    match serde_json::to_string(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Fatal error: failed to encode snapshot: {e}");
            process::exit(1);
        }
    }
}
