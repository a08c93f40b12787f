// src/logging.rs
// Sets up tracing output on stderr (stdout is reserved for results/--json).
// RUST_LOG, when set, wins over the defaults below.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,doc_harvester=debug"
    } else {
        "warn,doc_harvester=info"
    }
}

pub fn init(verbose: bool) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_enables_debug_for_this_crate() {
        assert!(default_filter(true).contains("doc_harvester=debug"));
        assert!(default_filter(false).contains("doc_harvester=info"));
    }
}
