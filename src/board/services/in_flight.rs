//! Per-task serialization of mutations.

use super::{InFlightPolicy, ValidationError};
use crate::board::domain::TaskId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as SlotLock, OwnedMutexGuard};

/// Grants at most one mutation slot per task id at a time.
#[derive(Debug, Default)]
pub(crate) struct InFlightRegistry {
    slots: Mutex<HashMap<TaskId, Arc<SlotLock<()>>>>,
}

/// Exclusive right to mutate one task; released on drop.
#[derive(Debug)]
pub(crate) struct InFlightPermit {
    _slot: OwnedMutexGuard<()>,
}

impl InFlightRegistry {
    /// Acquires the slot for `task_id` according to `policy`.
    ///
    /// Under [`InFlightPolicy::Queue`] waiters are served in arrival order.
    pub(crate) async fn acquire(
        &self,
        task_id: &TaskId,
        policy: InFlightPolicy,
    ) -> Result<InFlightPermit, ValidationError> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            // Slots referenced only by the map have no holder and no waiter.
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            Arc::clone(slots.entry(task_id.clone()).or_default())
        };

        let guard = match policy {
            InFlightPolicy::Queue => slot.lock_owned().await,
            InFlightPolicy::Reject => slot
                .try_lock_owned()
                .map_err(|_| ValidationError::UpdateInProgress(task_id.clone()))?,
        };
        Ok(InFlightPermit { _slot: guard })
    }

    /// Returns `true` while a permit for `task_id` is held.
    pub(crate) fn is_busy(&self, task_id: &TaskId) -> bool {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(task_id)
            .is_some_and(|slot| slot.try_lock().is_err())
    }
}
