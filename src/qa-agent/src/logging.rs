//! Log setup for test binaries
//!
//! Components log through `tracing` and never install a subscriber themselves.
//! Test code calls [`init_test_logging`] to see that output.

use once_cell::sync::OnceCell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "portal_qa_agent=debug";

static INIT: OnceCell<()> = OnceCell::new();

/// Install an `RUST_LOG`-driven subscriber that writes through the test writer.
///
/// Safe to call from every test; only the first call in a process does anything.
/// A subscriber installed elsewhere is left in place.
pub fn init_test_logging() {
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| DEFAULT_FILTER.into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}
