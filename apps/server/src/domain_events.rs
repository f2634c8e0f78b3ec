//! Server-side sink for domain events.
//!
//! There are no downstream consumers yet, so events are written to the
//! tracing pipeline where they show up next to the request spans.

use lifeos_core::events::{DomainEvent, DomainEventSink};
use tracing::{debug, info};

#[derive(Clone, Default)]
pub struct TracingDomainEventSink;

impl DomainEventSink for TracingDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        match &event {
            DomainEvent::GoalProgressChanged {
                goal_id,
                previous_value,
                current_value,
                completed,
                reopened,
                ..
            } if *completed || *reopened => {
                info!(
                    goal_id = %goal_id,
                    previous_value,
                    current_value,
                    completed,
                    reopened,
                    "Goal completion changed"
                );
            }
            DomainEvent::GoalDeleted { goal_id } => {
                info!(goal_id = %goal_id, "Goal deleted");
            }
            other => debug!(event = ?other, "Domain event"),
        }
    }
}
