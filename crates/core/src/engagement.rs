//! Boundary to the gamification collaborator. The engine only emits the
//! triggering events; it never computes points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EngagementEvent {
    ProductViewed { product_id: ProductId, duration_secs: f64 },
    ProductPurchased { product_id: ProductId, quantity: u32 },
    WishlistToggled { product_id: ProductId, added: bool },
    SearchPerformed { term: String, result_count: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngagementSignal {
    pub event: EngagementEvent,
    pub at: DateTime<Utc>,
}

impl EngagementSignal {
    pub fn now(event: EngagementEvent) -> Self {
        Self { event, at: Utc::now() }
    }
}

/// Receives point-award trigger signals.
pub trait EngagementSink: Send + Sync {
    fn publish(&self, signal: EngagementSignal);
}

/// Default sink: drops everything.
#[derive(Debug, Default)]
pub struct NoopEngagementSink;

impl EngagementSink for NoopEngagementSink {
    fn publish(&self, _signal: EngagementSignal) {}
}

/// Test sink that records published signals.
#[derive(Debug, Default)]
pub struct RecordingEngagementSink {
    signals: std::sync::Mutex<Vec<EngagementSignal>>,
}

impl RecordingEngagementSink {
    pub fn recorded(&self) -> Vec<EngagementSignal> {
        self.signals.lock().map(|signals| signals.clone()).unwrap_or_default()
    }
}

impl EngagementSink for RecordingEngagementSink {
    fn publish(&self, signal: EngagementSignal) {
        if let Ok(mut signals) = self.signals.lock() {
            signals.push(signal);
        }
    }
}
