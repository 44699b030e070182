//! Execution-scoped recording of entity-type reads.
//!
//! A [`ReadTracker`] is the hook point the data-access layer cooperates
//! with: while a recording frame is active, every entity-type read the
//! executor reports is accumulated into the frame's access set. The tracker
//! is an explicit capability threaded through the call chain, never a
//! process-wide singleton, so concurrent executions cannot misattribute
//! reads to each other.

use readset_core::{CacheResult, EntityType};
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Records the set of distinct entity types read during one execution.
///
/// Recordings compose as a stack: a read reported while an inner frame is
/// active also lands in every enclosing frame, so a nested recording never
/// hides reads from the recording that wraps it. Frames are popped by a
/// guard on every exit path, including cancellation of the enclosing
/// future, so an abandoned recording cannot corrupt a later one.
#[derive(Debug, Default)]
pub struct ReadTracker {
    frames: Mutex<Vec<BTreeSet<EntityType>>>,
}

impl ReadTracker {
    /// Create a tracker with no active recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report an entity-type read to every active recording frame.
    ///
    /// Called synchronously by the data-access layer. Reports made while no
    /// recording is active are dropped.
    pub fn report(&self, entity_type: impl Into<EntityType>) {
        let entity_type = entity_type.into();
        let mut frames = self.lock();
        for frame in frames.iter_mut() {
            frame.insert(entity_type.clone());
        }
    }

    /// Whether a recording frame is currently active.
    pub fn is_recording(&self) -> bool {
        !self.lock().is_empty()
    }

    /// Run `work` exactly once, collecting the entity types read while it
    /// executes.
    ///
    /// Returns the access set alongside `work`'s result. An error from
    /// `work` is passed through unchanged after the frame is deactivated;
    /// deciding whether to cache belongs to the caller.
    pub async fn record<T, F>(&self, work: F) -> (BTreeSet<EntityType>, CacheResult<T>)
    where
        F: Future<Output = CacheResult<T>>,
    {
        let frame = FrameGuard::push(self);
        let result = work.await;
        let reads = frame.finish();
        (reads, result)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<BTreeSet<EntityType>>> {
        // Critical sections never panic while holding the lock; recover
        // rather than poison-cascade.
        self.frames.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Pops the recording frame when the recording ends, however it ends.
struct FrameGuard<'a> {
    tracker: &'a ReadTracker,
    depth: usize,
    armed: bool,
}

impl<'a> FrameGuard<'a> {
    fn push(tracker: &'a ReadTracker) -> Self {
        let mut frames = tracker.lock();
        let depth = frames.len();
        frames.push(BTreeSet::new());
        Self {
            tracker,
            depth,
            armed: true,
        }
    }

    /// Pop the frame and return its access set.
    fn finish(mut self) -> BTreeSet<EntityType> {
        self.armed = false;
        let mut frames = self.tracker.lock();
        let mut drained = frames.drain(self.depth..);
        drained.next().unwrap_or_default()
    }
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            // Recording abandoned mid-flight; discard this frame and any
            // nested ones so the tracker is clean for the next call.
            self.tracker.lock().truncate(self.depth);
        }
    }
}
