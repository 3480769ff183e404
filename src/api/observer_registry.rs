use crate::engine::ChartEngine;
use crate::error::{ViewportError, ViewportResult};
use crate::extensions::{ViewportEvent, ViewportObserver};

use super::ChartController;

impl<E: ChartEngine> ChartController<E> {
    /// Registers an observer with a unique, non-empty identifier.
    pub fn register_observer(&mut self, observer: Box<dyn ViewportObserver>) -> ViewportResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(ViewportError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.observers.contains_key(&observer_id) {
            return Err(ViewportError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.insert(observer_id, observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        self.observers.shift_remove(observer_id).is_some()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers.contains_key(observer_id)
    }

    /// Delivers `event` to observers in registration order.
    pub(super) fn emit_event(&mut self, event: ViewportEvent) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in self.observers.values_mut() {
            observer.on_event(event, snapshot);
        }
    }
}
