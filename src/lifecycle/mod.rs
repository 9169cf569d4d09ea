//! # System Lifecycle
//!
//! Starts the session actor with its dependencies, performs the initial
//! restaurant load, and shuts everything down again.
//!
//! ```rust,ignore
//! let system = StorefrontSystem::start(config).await?;
//!
//! let menu = system.client.select_restaurant(restaurant_id).await?;
//! // ...
//!
//! system.shutdown().await?;
//! ```
//!
//! Dependencies can be injected with [`StorefrontSystem::start_with`], which
//! is how the integration tests swap in scripted services.

pub mod storefront_system;

pub use storefront_system::*;
