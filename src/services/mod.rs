//! # Services
//!
//! The storefront's two outside collaborators, each behind a capability trait:
//!
//! - [`GenerationService`] produces restaurant listings, menus and order
//!   confirmations. [`ProxyGenerationService`] talks to the HTTP proxy;
//!   [`OfflineCatalog`] answers from fixed data when no proxy is configured.
//! - [`OrderSink`] keeps a record of every confirmed order. [`LogSink`] writes
//!   it to the log.
//!
//! [`mock`] holds scripted versions of both for tests.

pub mod error;
pub mod generation;
pub mod mock;
pub mod offline;
pub mod prompt;
pub mod proxy;
pub mod sink;

pub use error::*;
pub use generation::GenerationService;
pub use offline::OfflineCatalog;
pub use proxy::{ProxyConfig, ProxyGenerationService};
pub use sink::{LogSink, OrderSink};
