use citybikes_core::{Action, AppState};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Owner of the session's [`AppState`].
///
/// Cloning the store clones the handle, not the state. Each dispatched action
/// is applied under the lock, so readers never observe half of a transition.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<AppState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self, action: Action) {
        tracing::trace!("Dispatching {:?}", action);
        self.lock().apply(action);
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.lock().clone()
    }

    /// Read the current state without copying it.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        // apply() never panics midway, so a poisoned state is still whole
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
