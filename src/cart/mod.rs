//! In-memory cart: line items, quantities and totals.
//!
//! The ledger is plain data. It lives inside the session context and is only
//! touched from the session actor's task.

pub mod ledger;

pub use ledger::*;
