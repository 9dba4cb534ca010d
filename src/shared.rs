//! Tracker shared between concurrent producers.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use tracker_core::{
    OrientationState, OrientationUpdate, Outputs, Tracker, TrackerConfig, UpdateError,
};

/// A [`Tracker`] behind an `embassy_sync` blocking mutex.
///
/// Each [`apply`](Self::apply) stores the update and renders its events inside
/// one lock, so a reader never observes a partially updated sample and events
/// are always rendered from the state they were produced by. Several tasks (or
/// interrupt handlers, with `CriticalSectionRawMutex`) may feed the same
/// tracker.
///
/// `new` is `const`, so the tracker can live in a `static`.
pub struct SharedTracker<M: RawMutex> {
    inner: Mutex<M, RefCell<Tracker>>,
}

impl<M: RawMutex> SharedTracker<M> {
    pub const fn new(config: TrackerConfig) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Tracker::new(config))),
        }
    }

    /// Apply one update atomically. See [`tracker_core::process`].
    pub fn apply(&self, update: OrientationUpdate) -> Result<Outputs, UpdateError> {
        self.inner.lock(|cell| cell.borrow_mut().apply(update))
    }

    /// Copy of the current state.
    pub fn state(&self) -> OrientationState {
        self.with(|tracker| *tracker.state())
    }

    pub fn set_config(&self, config: TrackerConfig) {
        self.with_mut(|tracker| tracker.set_config(config));
    }

    /// Access the tracker immutably under the lock.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Tracker) -> R,
    {
        self.inner.lock(|cell| f(&cell.borrow()))
    }

    /// Access the tracker mutably under the lock.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Tracker) -> R,
    {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}
