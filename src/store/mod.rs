//! Holder of the snapshot currently served.
//!
//! Readers load an `Arc` to the current snapshot without locking and keep using it for
//! the rest of their request. The refresh job publishes a complete replacement in one swap,
//! so a reader never sees a half-built index and a replaced snapshot lives on until its
//! last reader drops it.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::models::ScheduleSnapshot;

pub struct SnapshotStore {
    current: ArcSwap<ScheduleSnapshot>,
}

impl SnapshotStore {
    /// A store can only exist once a first snapshot has been built.
    pub fn new(initial: ScheduleSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    /// The snapshot to use for one whole request.
    pub fn current(&self) -> Arc<ScheduleSnapshot> {
        self.current.load_full()
    }

    /// Publish `snapshot` to all subsequent `current` calls.
    pub fn replace(&self, snapshot: ScheduleSnapshot) {
        self.current.store(Arc::new(snapshot));
    }
}
