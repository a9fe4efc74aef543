//! # Tracing Setup
//!
//! Every actor logs its lifecycle with an `entity_type` field (`Created`,
//! `Action ok`, `Transaction rolled back`, ...), so module targets add nothing
//! and are hidden. `RUST_LOG` wins over the default directive when set.
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle events
//! RUST_LOG=debug cargo run     # request payloads
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global compact subscriber.
///
/// `default_directive` (e.g. `"info"` or `"storefront=debug,info"`) applies
/// when `RUST_LOG` is unset or unparsable.
pub fn setup_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
