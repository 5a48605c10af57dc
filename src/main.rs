use std::process;

use git_commit_mklog::ParsedOptions;

fn main() {
    // Diagnostics go to stderr and stay quiet unless RUST_LOG asks for more,
    // so the wrapper never mixes its output into git's.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let options = ParsedOptions::parse();

    match options.execute() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");

            // Print the full error chain if available
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("  Caused by: {err}");
                source = err.source();
            }

            process::exit(1);
        }
    }
}
