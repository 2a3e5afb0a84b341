use std::process;

use clap::Parser;
use gitlint::Cli;

/// Exit code when at least one issue was reported.
const EXIT_ISSUES: i32 = 1;

/// Exit code for configuration, repository and I/O failures.
const EXIT_FATAL: i32 = 2;

fn main() {
    // Initialize tracing subscriber with RUST_LOG environment variable support
    // Default to "warn" level if RUST_LOG is not set
    // Write to stderr so logs don't interfere with the report on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.execute() {
        Ok(0) => {}
        Ok(_) => process::exit(EXIT_ISSUES),
        Err(e) => {
            eprintln!("Error: {e}");

            // Print the full error chain if available
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("  Caused by: {err}");
                source = err.source();
            }

            process::exit(EXIT_FATAL);
        }
    }
}
