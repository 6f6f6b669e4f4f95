//! Reducer-backed state container with synchronous subscriptions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::ui::mvi::Reducer;

type Listener<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the state of one reducer.
///
/// The only way to change the state is [`dispatch`](Self::dispatch), which
/// runs the reducer and then calls every subscriber with the new snapshot
/// before returning. Clones share the same state.
pub struct Store<R: Reducer> {
    inner: Arc<Inner<R::State>>,
}

struct Inner<S> {
    state: RwLock<S>,
    listeners: Mutex<Vec<(SubscriptionId, Listener<S>)>>,
    next_id: AtomicU64,
}

impl<R: Reducer> Store<R> {
    /// Store starting from `R::State::default()`.
    pub fn new() -> Self {
        Self::with_state(R::State::default())
    }

    pub fn with_state(state: R::State) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(state),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> R::State {
        self.inner.state.read().clone()
    }

    /// Borrow the current state without cloning it.
    pub fn with<T>(&self, f: impl FnOnce(&R::State) -> T) -> T {
        f(&self.inner.state.read())
    }

    /// Apply `intent` and notify subscribers. Returns whether the state
    /// changed.
    ///
    /// Reductions are serialized, but no lock is held while subscribers run,
    /// so they may read the store or dispatch again. Notification order is
    /// only guaranteed for a single dispatching thread: with concurrent
    /// writers a listener can receive an older snapshot after a newer one.
    pub fn dispatch(&self, intent: R::Intent) -> bool {
        let (snapshot, changed) = {
            let mut guard = self.inner.state.write();
            let current = std::mem::take(&mut *guard);
            let previous = current.clone();
            *guard = R::reduce(current, intent);
            (guard.clone(), *guard != previous)
        };

        let listeners: Vec<Listener<R::State>> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }

        changed
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&R::State) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}
