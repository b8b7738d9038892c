//! Where services send their change notifications.

#[cfg(test)]
use std::sync::Mutex;

use super::DomainEvent;

/// Receives a [`DomainEvent`] after each successful mutation.
///
/// Emitting is best-effort and happens after the write committed, so an
/// implementation must not block and must not fail the caller.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);

    fn emit_batch(&self, events: Vec<DomainEvent>) {
        events.into_iter().for_each(|event| self.emit(event));
    }
}

/// Keeps every emitted event so tests can assert on them.
#[cfg(test)]
#[derive(Default)]
pub struct MockDomainEventSink {
    events: Mutex<Vec<DomainEvent>>,
}

#[cfg(test)]
impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

#[cfg(test)]
impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.events.lock().unwrap().push(event);
    }
}
