use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    if let Err(err) = telagen::cli::run_cli() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr via `tracing`; progress lines stay on stdout.
/// `TELAGEN_LOG` sets the filter, `TELAGEN_LOG_FORMAT=json` switches to
/// structured output.
fn init_logging() {
    let filter = EnvFilter::try_from_env("TELAGEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var("TELAGEN_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
