//! Plain data types shared by the session, the pipeline and the services.

pub mod customer;
pub mod menu;
pub mod order;
pub mod restaurant;

pub use customer::*;
pub use menu::*;
pub use order::*;
pub use restaurant::*;
