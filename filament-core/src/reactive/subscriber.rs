//! Subscriber types for the reactive system.
//!
//! A Subscriber is anything registered in a signal's subscriber set: a full
//! computation (effect) with dependency bookkeeping, or a plain callback
//! registered via `subscribe` or `track`.
//!
//! Each signal owns one subscriber set. The set is keyed by [`SubscriberId`]
//! so registration is idempotent, and backed by an `IndexMap` so
//! notification runs in insertion order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::effect::EffectInner;

/// Unique identifier for a subscriber.
///
/// Each subscriber (effect, computed, or plain callback) gets a unique ID
/// when created. The ID is what makes dependency registration idempotent:
/// reading the same signal twice in one computation adds one entry, not two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Generate a new unique subscriber ID.
    ///
    /// Uses an atomic counter to ensure uniqueness across threads.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

/// A single entry in a signal's subscriber set.
#[derive(Clone)]
pub(crate) enum Subscriber {
    /// A full computation. Held strongly: an effect stays live while it is
    /// subscribed somewhere and is released when disposal erases it from
    /// every set.
    Computation(Arc<EffectInner>),

    /// A plain notification callback, with no dependency bookkeeping.
    Callback(Arc<dyn Fn() + Send + Sync>),
}

impl Subscriber {
    /// Deliver one change notification to this subscriber.
    pub(crate) fn invoke(&self) {
        match self {
            Subscriber::Computation(inner) => inner.clone().execute(),
            Subscriber::Callback(callback) => callback(),
        }
    }
}

/// The subscriber set of a single signal.
///
/// `IndexMap` gives set semantics (no duplicate subscriber) while
/// preserving insertion order for notification.
pub(crate) type SubscriberSet = RwLock<IndexMap<SubscriberId, Subscriber>>;

/// Shared handle to a subscriber set. Signals hold it strongly; the
/// computations registered inside hold it weakly as a back-reference used
/// to erase themselves during cleanup.
pub(crate) type SharedSubscriberSet = Arc<SubscriberSet>;
