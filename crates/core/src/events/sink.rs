//! Where domain events go.

use std::sync::{Arc, Mutex};

use super::DomainEvent;

/// Receiver of domain events.
///
/// `emit()` is called after the mutation has committed and must not block or
/// fail the caller. Delivery is best-effort.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);

    fn emit_batch(&self, events: Vec<DomainEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// Discards everything. Default sink for services built without one.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Keeps every event in memory, in emission order.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.lock().clone()
    }

    /// `(goal_id, previous_value, current_value)` for every progress event.
    pub fn progress_moves(&self) -> Vec<(String, i32, i32)> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                DomainEvent::GoalProgressChanged {
                    goal_id,
                    previous_value,
                    current_value,
                    ..
                } => Some((goal_id.clone(), *previous_value, *current_value)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DomainEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.lock().push(event);
    }
}
