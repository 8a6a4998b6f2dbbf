//! Signal Implementation
//!
//! A Signal is the fundamental reactive primitive. It holds a value and
//! maintains the set of subscribers that depend on it.
//!
//! # How Signals Work
//!
//! 1. When a signal is read within a tracking context (an effect body, a
//!    computed recompute, or a `track` call), the signal registers that
//!    tracker as a subscriber.
//!
//! 2. When a signal's value changes, subscribers are notified synchronously,
//!    in insertion order, against a snapshot of the set taken before
//!    iteration begins. A subscriber that unsubscribes itself (or another
//!    subscriber) during notification affects subsequent writes only, never
//!    the in-progress pass.
//!
//! 3. Writes whose new value is identical to the current one (see
//!    [`Identity`]) are suppressed entirely: no mutation, no notification.
//!
//! # Hazards
//!
//! Propagation is synchronous and there is no cycle detection. A subscriber
//! that writes back to a signal it (transitively) depends on recurses
//! unboundedly and overflows the stack. A subscriber that panics aborts the
//! remaining notifications for that write; the panic propagates to the
//! `set` caller.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::trace;

use super::batch;
use super::context::{self, TrackerFrame};
use super::identity::Identity;
use super::subscriber::{SharedSubscriberSet, Subscriber, SubscriberId};

/// Counter for generating unique signal IDs.
static SIGNAL_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a new unique signal ID.
fn next_signal_id() -> u64 {
    SIGNAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A reactive signal holding a value of type T.
///
/// Cloning a signal produces a second handle to the same cell: the value
/// and subscriber set are shared.
///
/// # Example
///
/// ```rust,ignore
/// let count = Signal::new(0);
///
/// // Read the value (registers a dependency inside a tracking context)
/// let value = count.get();
///
/// // Update the value (notifies subscribers unless identical)
/// count.set(5);
/// ```
pub struct Signal<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    /// Unique identifier, used for logging and Debug output.
    id: u64,

    /// The current value.
    value: Arc<RwLock<T>>,

    /// Subscribers registered against this signal, in insertion order.
    subscribers: SharedSubscriberSet,
}

impl<T> Signal<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    /// Create a new signal with the given initial value.
    pub fn new(value: T) -> Self {
        Self {
            id: next_signal_id(),
            value: Arc::new(RwLock::new(value)),
            subscribers: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Get the signal's unique ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get the current value.
    ///
    /// If a tracker is active on this thread, it is registered in this
    /// signal's subscriber set. Registration is idempotent: reading the
    /// same signal twice in one computation adds one subscription.
    pub fn get(&self) -> T {
        self.register_current_tracker();
        self.value.read().clone()
    }

    /// Get the current value without registering any dependency.
    ///
    /// Use this when a reader must see the state without becoming reactive
    /// to it.
    pub fn peek(&self) -> T {
        self.value.read().clone()
    }

    /// Set a new value and synchronously notify subscribers.
    ///
    /// If the new value is identical to the current one the write is
    /// suppressed: no mutation, no notification. Otherwise every subscriber
    /// present at the start of the notification pass is invoked in
    /// insertion order. Effects among them re-run before `set` returns.
    pub fn set(&self, value: T) {
        {
            let current = self.value.read();
            if current.identical(&value) {
                trace!(signal = self.id, "write suppressed: identical value");
                return;
            }
        }

        *self.value.write() = value;
        self.notify();
    }

    /// Update the value using a function of the current value.
    ///
    /// Routed through [`set`](Signal::set), so identity suppression applies
    /// to the result.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let new_value = {
            let guard = self.value.read();
            f(&guard)
        };
        self.set(new_value);
    }

    /// Register a plain callback directly in the subscriber set.
    ///
    /// The callback is invoked on every accepted write, with no dependency
    /// bookkeeping. Returns an unsubscribe function; calling it more than
    /// once is a safe no-op after the first call.
    pub fn subscribe<F>(&self, callback: F) -> impl Fn() + Send + Sync
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriberId::new();
        self.subscribers
            .write()
            .insert(id, Subscriber::Callback(Arc::new(callback)));

        let subscribers = Arc::downgrade(&self.subscribers);
        move || {
            if let Some(subscribers) = subscribers.upgrade() {
                subscribers.write().shift_remove(&id);
            }
        }
    }

    /// Get the number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Register the currently active tracker, if any, in this signal's
    /// subscriber set.
    fn register_current_tracker(&self) {
        let Some(frame) = context::current_tracker() else {
            return;
        };

        match frame {
            TrackerFrame::Computation(weak) => {
                let Some(effect) = weak.upgrade() else {
                    return;
                };
                let mut subscribers = self.subscribers.write();
                if !subscribers.contains_key(&effect.id()) {
                    subscribers.insert(effect.id(), Subscriber::Computation(effect.clone()));
                    drop(subscribers);
                    // Back-reference so the effect can erase this
                    // registration during its next cleanup pass.
                    effect.add_dependency(Arc::downgrade(&self.subscribers));
                }
            }
            TrackerFrame::Callback(id, callback) => {
                self.subscribers
                    .write()
                    .entry(id)
                    .or_insert_with(|| Subscriber::Callback(callback));
            }
            TrackerFrame::Untracked => {}
        }
    }

    /// Notify all subscribers that the value has changed.
    ///
    /// Iterates a snapshot of the subscriber set, so mutation of the live
    /// set during notification cannot corrupt the pass. If a batching
    /// collaborator is installed, the whole pass runs inside it.
    fn notify(&self) {
        let snapshot: Vec<Subscriber> = self.subscribers.read().values().cloned().collect();
        if snapshot.is_empty() {
            return;
        }

        trace!(
            signal = self.id,
            subscribers = snapshot.len(),
            "notifying subscribers"
        );

        let flush = || {
            for subscriber in &snapshot {
                subscriber.invoke();
            }
        };

        match batch::collaborator() {
            Some(collaborator) => collaborator(&flush),
            None => flush(),
        }
    }
}

impl<T> Clone for Signal<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Arc::clone(&self.value),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T> Debug for Signal<T>
where
    T: Clone + Send + Sync + Identity + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.id)
            .field("value", &self.peek())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

/// Create a signal split into read and write handles.
///
/// This is the lightweight call shape used by component code: a getter
/// handle and a setter handle over one shared cell. It is a thin adapter
/// over [`Signal`], not a second implementation.
///
/// ```rust,ignore
/// let (count, set_count) = signal(0);
/// set_count.set(count.peek() + 1);
/// ```
pub fn signal<T>(value: T) -> (ReadSignal<T>, WriteSignal<T>)
where
    T: Clone + Send + Sync + Identity + 'static,
{
    let inner = Signal::new(value);
    (
        ReadSignal {
            inner: inner.clone(),
        },
        WriteSignal { inner },
    )
}

/// Read half of a split signal. See [`signal`].
pub struct ReadSignal<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    inner: Signal<T>,
}

impl<T> ReadSignal<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    /// Get the current value, registering the active tracker.
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Get the current value without registering any dependency.
    pub fn peek(&self) -> T {
        self.inner.peek()
    }

    /// Register a plain callback; see [`Signal::subscribe`].
    pub fn subscribe<F>(&self, callback: F) -> impl Fn() + Send + Sync
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.subscribe(callback)
    }
}

impl<T> Clone for ReadSignal<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Write half of a split signal. See [`signal`].
pub struct WriteSignal<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    inner: Signal<T>,
}

impl<T> WriteSignal<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    /// Set a new value; see [`Signal::set`].
    pub fn set(&self, value: T) {
        self.inner.set(value);
    }

    /// Update the value using a function of the current value.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        self.inner.update(f);
    }
}

impl<T> Clone for WriteSignal<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
