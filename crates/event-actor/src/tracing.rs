//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the subscriber used by every binary in the
//! workspace.
//!
//! - **Structured logging** with the `tracing` crate
//! - **Configurable levels** through `RUST_LOG`
//! - **Compact format** without module targets; actors log a `state_type`
//!   field instead
//!
//! ```bash
//! RUST_LOG=info cargo run          # commands that change state, alerts
//! RUST_LOG=debug cargo run         # every command, event and payload
//! RUST_LOG=event_actor=debug,storefront=info cargo run
//! ```
//!
//! With `RUST_LOG=debug` the actor logs each command once on arrival
//! (`Command command=SelectRestaurant(..)`), the deferral, and the completion
//! event, so one submission reads as:
//!
//! ```text
//! DEBUG Command state_type="Session" command=SubmitCheckout
//! DEBUG Deferred state_type="Session" in_flight=1
//! INFO  submit: Order confirmed order_number="MOCK-4821"
//! DEBUG Event state_type="Session" event=OrderSettled { .. }
//! ```

/// Initializes the tracing subscriber with `RUST_LOG` filtering.
///
/// `default_directives` applies when `RUST_LOG` is unset or unparsable, e.g.
/// `"storefront=info,event_actor=info"`. Calling it twice is harmless: the
/// second attempt is ignored.
pub fn setup_tracing(default_directives: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
