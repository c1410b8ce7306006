use std::sync::Once;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVES: [&str; 2] = ["aurum_engine=info", "aurum_core=warn"];

/// Initializes the global tracing subscriber with sensible defaults.
///
/// `RUST_LOG` directives are honoured; the engine's own target logs at `info`
/// and the calculation services at `warn` unless overridden. A subscriber
/// installed elsewhere is left in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = fmt().with_env_filter(default_filter()).try_init();
    });
}

fn default_filter() -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    for directive in DEFAULT_DIRECTIVES {
        if let Ok(directive) = directive.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_covers_engine_and_services() {
        let rendered = default_filter().to_string();
        assert!(rendered.contains("aurum_engine=info"), "{rendered}");
        assert!(rendered.contains("aurum_core=warn"), "{rendered}");
    }
}
