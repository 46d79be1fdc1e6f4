//! Observable value holder.
//!
//! A [`Store`] owns one value and a list of subscribers. Subscribers are
//! called with the current value when they subscribe and again, synchronously
//! and in subscription order, after every `set`/`update`.
//!
//! A mutation made from inside a subscriber is queued and delivered once the
//! running notification has reached every subscriber, so all subscribers see
//! the same sequence of values.
//!
//! Handles are cheap to clone and `Send + Sync`, so a store can be placed in
//! Leptos context and bridged into signals (see `app::use_store`).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: RwLock<T>,
    subscribers: Mutex<Vec<(u64, Callback<T>)>>,
    next_id: AtomicU64,
    /// Values waiting to be delivered, oldest first.
    pending: Mutex<VecDeque<T>>,
    /// Set while the outermost `notify` is draining `pending`.
    notifying: AtomicBool,
}

impl<T> Inner<T> {
    fn subscribers(&self) -> MutexGuard<'_, Vec<(u64, Callback<T>)>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn pending(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove_subscriber(&self, id: u64) {
        self.subscribers().retain(|(sid, _)| *sid != id);
    }
}

/// Clears the `notifying` flag even if a subscriber panics.
struct DrainGuard<'a>(&'a AtomicBool);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Shared observable state.
pub struct Store<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: RwLock::new(value),
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
                pending: Mutex::new(VecDeque::new()),
                notifying: AtomicBool::new(false),
            }),
        }
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    /// Borrow the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self.inner.value.read().unwrap_or_else(PoisonError::into_inner);
        f(&value)
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.update(|current| *current = value);
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let snapshot = {
            let mut value = self
                .inner
                .value
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            f(&mut value);
            value.clone()
        };
        self.notify(snapshot);
    }

    /// Register a listener; it is called immediately with the current value.
    #[must_use = "dropping the subscription unsubscribes; call `detach` to keep it"]
    pub fn subscribe(&self, f: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let callback: Callback<T> = Arc::new(f);
        self.inner.subscribers().push((id, Arc::clone(&callback)));
        callback(&self.get());

        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.remove_subscriber(id);
                }
            })),
        }
    }

    /// Read-only projection that follows this store.
    ///
    /// The link holds the projection weakly; once every handle to it is
    /// dropped, the link removes itself on the next notification.
    pub fn derive<U>(&self, f: impl Fn(&T) -> U + Send + Sync + 'static) -> Store<U>
    where
        U: Clone + PartialEq + Send + Sync + 'static,
    {
        let derived = Store::new(self.with(&f));
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let source: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        let target: Weak<Inner<U>> = Arc::downgrade(&derived.inner);

        let link: Callback<T> = Arc::new(move |value| {
            let Some(inner) = target.upgrade() else {
                if let Some(source) = source.upgrade() {
                    source.remove_subscriber(id);
                }
                return;
            };
            let target = Store { inner };
            let next = f(value);
            if target.with(|current| *current != next) {
                target.set(next);
            }
        });
        self.inner.subscribers().push((id, link));
        derived
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers().len()
    }

    fn notify(&self, value: T) {
        self.inner.pending().push_back(value);
        if self.inner.notifying.swap(true, Ordering::Acquire) {
            // A notification further up the stack drains the queue.
            return;
        }
        let _guard = DrainGuard(&self.inner.notifying);

        loop {
            let Some(value) = self.inner.pending().pop_front() else {
                break;
            };
            // Snapshot so subscribers may subscribe or unsubscribe re-entrantly.
            let callbacks: Vec<Callback<T>> = self
                .inner
                .subscribers()
                .iter()
                .map(|(_, cb)| Arc::clone(cb))
                .collect();
            for callback in callbacks {
                callback(&value);
            }
        }
    }
}

impl<T: Clone + Default + Send + Sync + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Handle returned by [`Store::subscribe`]. Unsubscribes on drop.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Keep the listener registered for the lifetime of the store.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }

    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + Send + Sync + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |v: &T| sink.lock().unwrap().push(v.clone()))
    }

    #[test]
    fn test_subscribe_receives_current_then_updates() {
        let store = Store::new(1);
        let (seen, cb) = recorder();
        let _sub = store.subscribe(cb);
        store.set(2);
        store.update(|v| *v += 10);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 12]);
        assert_eq!(store.get(), 12);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let store = Store::new("a".to_string());
        let (seen, cb) = recorder();
        let sub = store.subscribe(cb);
        assert_eq!(store.subscriber_count(), 1);
        store.set("b".into());
        sub.unsubscribe();
        assert_eq!(store.subscriber_count(), 0);
        store.set("c".into());
        assert_eq!(*seen.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_detach_keeps_listener() {
        let store = Store::new(0u8);
        let (seen, cb) = recorder();
        store.subscribe(cb).detach();
        store.set(5);
        assert_eq!(store.subscriber_count(), 1);
        assert_eq!(*seen.lock().unwrap(), vec![0, 5]);
    }

    #[test]
    fn test_subscribers_notified_in_order() {
        let store = Store::new(0);
        let order = Arc::new(Mutex::new(Vec::new()));
        let subs: Vec<_> = (0..3)
            .map(|n| {
                let order = Arc::clone(&order);
                store.subscribe(move |_| order.lock().unwrap().push(n))
            })
            .collect();
        order.lock().unwrap().clear();
        store.set(1);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
        drop(subs);
    }

    #[test]
    fn test_reentrant_set_from_subscriber() {
        let store = Store::new(0);
        let handle = store.clone();
        let _sub = store.subscribe(move |v| {
            if *v == 1 {
                handle.set(2);
            }
        });
        let derived = store.derive(|v| v * 10);
        let (later, cb) = recorder();
        let _later = store.subscribe(cb);

        store.set(1);
        assert_eq!(store.get(), 2);
        // Later subscribers see the values in mutation order, ending on the latest.
        assert_eq!(*later.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(derived.get(), 20);
    }

    #[test]
    fn test_dropped_projection_is_unlinked() {
        let store = Store::new(1);
        let kept = store.derive(|v| v + 1);
        for _ in 0..3 {
            let _ = store.derive(|v| v * 2);
        }
        assert_eq!(store.subscriber_count(), 4);

        store.set(5);
        assert_eq!(store.subscriber_count(), 1);
        assert_eq!(kept.get(), 6);
    }

    #[test]
    fn test_derive_tracks_source() {
        let store = Store::new((1, "x"));
        let first = store.derive(|(n, _)| *n);
        let (seen, cb) = recorder();
        let _sub = first.subscribe(cb);
        store.update(|v| v.1 = "y");
        store.update(|v| v.0 = 3);
        assert_eq!(first.get(), 3);
        // Unchanged projections are not re-published.
        assert_eq!(*seen.lock().unwrap(), vec![1, 3]);
    }
}
