// ABOUTME: Logging setup for the keysmith binary.
// ABOUTME: stderr tracing subscriber, quiet by default so prompts stay readable.

use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// A valid RUST_LOG is used as given. Otherwise the filter is WARN, and
/// `verbose` raises keysmith's own crates to DEBUG.
pub fn init(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter(rust_log.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .init();
}

fn filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let mut filter = rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    if verbose {
        for directive in ["keysmith=debug", "keysmith_ssh=debug"] {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }
    }
    filter
}
