//! # Order Pipeline
//!
//! Turns a frozen [`OrderDraft`] into a [`ConfirmedOrder`]:
//!
//! 1. the draft already carries `total = subtotal + shipping fee`;
//! 2. the generation service issues an order number and delivery estimate;
//! 3. the confirmed order is assembled from the draft and the confirmation;
//! 4. a record of it is written to the [`OrderSink`].
//!
//! Steps run in order and nothing is retried. A sink failure happens after
//! the confirmation was issued, so [`PipelineError::Record`] hands the
//! confirmation back; passing it to the next [`OrderPipeline::submit`] for the
//! same draft skips step 2 and no second order number is minted.
//!
//! Applying the outcome to the view (clearing the cart, alerts) is the
//! session's job.

use crate::model::{ConfirmedOrder, OrderConfirmation, OrderDraft, OrderRecord};
use crate::services::{GenerationService, OrderSink, ServiceError, SinkError};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("{0}")]
    Confirmation(#[from] ServiceError),

    #[error("{source}")]
    Record {
        confirmation: OrderConfirmation,
        #[source]
        source: SinkError,
    },
}

impl PipelineError {
    /// The confirmation issued before the failure, if any.
    pub fn issued_confirmation(&self) -> Option<&OrderConfirmation> {
        match self {
            PipelineError::Confirmation(_) => None,
            PipelineError::Record { confirmation, .. } => Some(confirmation),
        }
    }
}

#[derive(Clone)]
pub struct OrderPipeline {
    service: Arc<dyn GenerationService>,
    sink: Arc<dyn OrderSink>,
}

impl OrderPipeline {
    pub fn new(service: Arc<dyn GenerationService>, sink: Arc<dyn OrderSink>) -> Self {
        Self { service, sink }
    }

    /// Runs the pipeline for `draft`. `issued` is a confirmation already
    /// obtained for this exact draft by an earlier attempt.
    #[instrument(skip_all, fields(restaurant = %draft.restaurant_name, total = draft.total))]
    pub async fn submit(
        &self,
        draft: OrderDraft,
        issued: Option<OrderConfirmation>,
    ) -> Result<ConfirmedOrder, PipelineError> {
        let confirmation = match issued {
            Some(confirmation) => {
                info!(order_number = %confirmation.order_number, "Reusing issued confirmation");
                confirmation
            }
            None => self.service.confirm_order(&draft).await?,
        };

        let order = ConfirmedOrder::assemble(draft, confirmation.clone());
        let record = OrderRecord::new(&order, Utc::now());

        if let Err(source) = self.sink.record(&record).await {
            warn!(
                order_number = %order.order_number,
                reason = %source.reason,
                "Order record not saved"
            );
            return Err(PipelineError::Record {
                confirmation,
                source,
            });
        }

        info!(order_number = %order.order_number, "Order confirmed");
        Ok(order)
    }
}
