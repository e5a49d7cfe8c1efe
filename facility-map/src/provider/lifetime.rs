use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{AbortHandle, Abortable};
use parking_lot::Mutex;

use crate::error::FacilityMapError;

/// Cancellation token tied to the time a map component is mounted.
///
/// Asynchronous work started on behalf of a component is run through
/// [`MountLifetime::guard`]. When the component is unmounted, [`MountLifetime::end`] aborts all
/// such work that is still in flight, so nothing completes into a component that no longer exists.
/// Clones share the same state.
#[derive(Clone, Default)]
pub struct MountLifetime {
    inner: Arc<LifetimeInner>,
}

#[derive(Default)]
struct LifetimeInner {
    ended: AtomicBool,
    next_task: AtomicU64,
    tasks: Mutex<HashMap<u64, AbortHandle>>,
}

impl MountLifetime {
    /// Creates a new lifetime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true until [`MountLifetime::end`] is called.
    pub fn is_alive(&self) -> bool {
        !self.inner.ended.load(Ordering::Acquire)
    }

    /// Ends the lifetime, aborting all guarded futures.
    pub fn end(&self) {
        if self.inner.ended.swap(true, Ordering::AcqRel) {
            return;
        }

        let tasks = std::mem::take(&mut *self.inner.tasks.lock());
        log::debug!("Mount lifetime ended, aborting {} tasks", tasks.len());
        for handle in tasks.into_values() {
            handle.abort();
        }
    }

    /// Runs the future until it completes or the lifetime ends.
    ///
    /// Returns [`FacilityMapError::Unmounted`] if the lifetime ended before the future completed or
    /// before it was started.
    pub async fn guard<F: Future>(&self, future: F) -> Result<F::Output, FacilityMapError> {
        if !self.is_alive() {
            return Err(FacilityMapError::Unmounted);
        }

        let (handle, registration) = AbortHandle::new_pair();
        let task = self.inner.next_task.fetch_add(1, Ordering::Relaxed);
        self.inner.tasks.lock().insert(task, handle);
        let _task = TaskEntry {
            inner: &self.inner,
            task,
        };

        match Abortable::new(future, registration).await {
            Ok(output) if self.is_alive() => Ok(output),
            _ => Err(FacilityMapError::Unmounted),
        }
    }
}

/// Removes the abort handle of a guarded future once it completes or is dropped.
struct TaskEntry<'a> {
    inner: &'a LifetimeInner,
    task: u64,
}

impl Drop for TaskEntry<'_> {
    fn drop(&mut self) {
        self.inner.tasks.lock().remove(&self.task);
    }
}
