use super::error::SinkError;
use crate::model::OrderRecord;
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Somewhere confirmed orders are written to. Write-only.
#[async_trait]
pub trait OrderSink: Send + Sync {
    async fn record(&self, record: &OrderRecord) -> Result<(), SinkError>;
}

/// Writes each record to the log after a simulated storage round trip.
#[derive(Debug, Clone)]
pub struct LogSink {
    latency: Duration,
}

impl LogSink {
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LATENCY)
    }
}

#[async_trait]
impl OrderSink for LogSink {
    async fn record(&self, record: &OrderRecord) -> Result<(), SinkError> {
        info!(
            order_number = %record.order_number,
            customer_name = %record.customer_name,
            phone = %record.phone,
            address = %record.address,
            total = record.total,
            restaurant = %record.restaurant,
            items = %record.items,
            notes = record.notes.as_deref().unwrap_or(""),
            payment_method = %record.payment_method,
            timestamp = %record.timestamp,
            "Saving order record"
        );
        tokio::time::sleep(self.latency).await;
        Ok(())
    }
}
