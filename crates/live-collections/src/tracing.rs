//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber filtered by
//! `RUST_LOG`. Collection actors log with a `collection` field instead of a
//! module path, so the target is hidden.
//!
//! ```bash
//! RUST_LOG=info cargo run     # writes, subscriptions, lifecycle
//! RUST_LOG=debug cargo run    # plus reads and full payloads
//! ```
//!
//! With `RUST_LOG=info` a sale looks like:
//!
//! ```text
//! INFO record_sale: Reserving key
//! INFO record_sale: Set collection=sales key=-NxQ3c8zAb1xYkL0pQ2r size=1
//! ```

/// Initializes the global subscriber. Call once, at process start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
