use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Install the tracing subscriber for binaries and tests embedding the core.
///
/// Reads `RUST_LOG` for the filter and falls back to `clubledger=info`.
/// Safe to call more than once; only the first call installs anything, and
/// an already-set global subscriber (e.g. from a test harness) wins.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("clubledger=info"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}
