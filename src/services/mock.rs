//! # Service Mocks
//!
//! Scripted stand-ins for [`GenerationService`] and [`OrderSink`], in the
//! same expectation style as `event_actor::mock::MockClient`: queue the
//! answers up front, run the code under test, then call `verify()`.
//!
//! ```rust
//! use storefront::services::mock::MockGenerationService;
//! use storefront::services::GenerationService;
//! use storefront::model::MenuItem;
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = MockGenerationService::new();
//!     service
//!         .expect_fetch_menu("Noodle Bar")
//!         .return_ok(vec![MenuItem::new("n1", "Beef noodles", 180)]);
//!
//!     let menu = service.fetch_menu("Noodle Bar").await.unwrap();
//!     assert_eq!(menu.len(), 1);
//!     service.verify();
//! }
//! ```
//!
//! Expectations are consumed in order per operation. A call with nothing
//! left to answer it panics, like an unexpected command on a mock actor.

use super::error::{ServiceError, SinkError};
use super::generation::GenerationService;
use super::sink::OrderSink;
use crate::model::{MenuItem, OrderConfirmation, OrderDraft, OrderRecord, Restaurant};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

struct Scripted<T, E> {
    argument: Option<String>,
    response: Result<T, E>,
}

type Script<T, E> = Mutex<VecDeque<Scripted<T, E>>>;

fn next<T, E>(script: &Script<T, E>, operation: &str, argument: Option<&str>) -> Result<T, E> {
    let scripted = script.lock().unwrap().pop_front();
    match scripted {
        Some(Scripted {
            argument: expected,
            response,
        }) => {
            if let Some(expected) = expected {
                assert_eq!(
                    Some(expected.as_str()),
                    argument,
                    "Unexpected argument for {operation}"
                );
            }
            response
        }
        None => panic!("No expectation left for {operation}({argument:?})"),
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<'a, T, E> {
    script: &'a Script<T, E>,
    argument: Option<String>,
}

impl<T, E> ExpectationBuilder<'_, T, E> {
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: E) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, E>) {
        self.script.lock().unwrap().push_back(Scripted {
            argument: self.argument,
            response,
        });
    }
}

/// A scripted [`GenerationService`].
#[derive(Default)]
pub struct MockGenerationService {
    restaurants: Script<Vec<Restaurant>, ServiceError>,
    menus: Script<Vec<MenuItem>, ServiceError>,
    confirmations: Script<OrderConfirmation, ServiceError>,
    drafts: Mutex<Vec<OrderDraft>>,
    latency: Duration,
}

impl MockGenerationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every answer, so tests can act while a call is in flight.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn expect_list_restaurants(&self) -> ExpectationBuilder<'_, Vec<Restaurant>, ServiceError> {
        ExpectationBuilder {
            script: &self.restaurants,
            argument: None,
        }
    }

    pub fn expect_fetch_menu(
        &self,
        restaurant_name: &str,
    ) -> ExpectationBuilder<'_, Vec<MenuItem>, ServiceError> {
        ExpectationBuilder {
            script: &self.menus,
            argument: Some(restaurant_name.to_string()),
        }
    }

    pub fn expect_confirm_order(&self) -> ExpectationBuilder<'_, OrderConfirmation, ServiceError> {
        ExpectationBuilder {
            script: &self.confirmations,
            argument: None,
        }
    }

    /// Every draft passed to `confirm_order`, oldest first.
    pub fn confirmed_drafts(&self) -> Vec<OrderDraft> {
        self.drafts.lock().unwrap().clone()
    }

    pub fn verify(&self) {
        let remaining = self.restaurants.lock().unwrap().len()
            + self.menus.lock().unwrap().len()
            + self.confirmations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl GenerationService for MockGenerationService {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ServiceError> {
        let response = next(&self.restaurants, "list_restaurants", None);
        self.pause().await;
        response
    }

    async fn fetch_menu(&self, restaurant_name: &str) -> Result<Vec<MenuItem>, ServiceError> {
        let response = next(&self.menus, "fetch_menu", Some(restaurant_name));
        self.pause().await;
        response
    }

    async fn confirm_order(&self, draft: &OrderDraft) -> Result<OrderConfirmation, ServiceError> {
        self.drafts.lock().unwrap().push(draft.clone());
        let response = next(&self.confirmations, "confirm_order", None);
        self.pause().await;
        response
    }
}

/// A scripted [`OrderSink`] that keeps every record it was given.
#[derive(Default)]
pub struct MockOrderSink {
    outcomes: Script<(), SinkError>,
    records: Mutex<Vec<OrderRecord>>,
}

impl MockOrderSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_record(&self) -> ExpectationBuilder<'_, (), SinkError> {
        ExpectationBuilder {
            script: &self.outcomes,
            argument: None,
        }
    }

    pub fn records(&self) -> Vec<OrderRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn verify(&self) {
        let remaining = self.outcomes.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

#[async_trait]
impl OrderSink for MockOrderSink {
    async fn record(&self, record: &OrderRecord) -> Result<(), SinkError> {
        self.records.lock().unwrap().push(record.clone());
        next(&self.outcomes, "record", None)
    }
}
