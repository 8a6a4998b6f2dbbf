//! Computed Signal Implementation
//!
//! A Computed is a read-only signal whose value is kept synchronized with a
//! derivation function by an internally owned effect.
//!
//! # How Computeds Work
//!
//! 1. On creation, the derivation runs once (untracked) to seed the inner
//!    cell, then the owning effect runs eagerly to establish dependencies.
//!
//! 2. Whenever any dependency changes, the effect re-runs synchronously and
//!    writes the fresh result into the cell. The exposed value is therefore
//!    never stale: `computed.peek()` always equals the derivation evaluated
//!    over the current dependency values.
//!
//! 3. The write into the cell goes through normal identity suppression, so
//!    a recompute that yields an identical result notifies nobody
//!    downstream.
//!
//! # Read-only Semantics
//!
//! Writes through the public `set` are rejected: a `warn!` diagnostic is
//! emitted and the value is left unchanged. Callers that want a hard error
//! instead use [`Computed::try_set`].

use std::fmt::Debug;
use std::sync::Arc;

use tracing::warn;

use super::context::untracked;
use super::effect::Effect;
use super::error::ReactiveError;
use super::identity::Identity;
use super::signal::Signal;

/// A read-only signal kept current by an internally owned effect.
///
/// # Example
///
/// ```rust,ignore
/// let a = Signal::new(2);
/// let b = Signal::new(3);
///
/// let sum = {
///     let (a, b) = (a.clone(), b.clone());
///     Computed::new(move || a.get() + b.get())
/// };
/// assert_eq!(sum.peek(), 5);
///
/// a.set(10);
/// assert_eq!(sum.peek(), 13); // already recomputed, synchronously
/// ```
pub struct Computed<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    /// The cell holding the latest derivation result.
    cell: Signal<T>,

    /// The owning effect; keeps the recompute computation addressable so
    /// Debug output can report on it.
    effect: Effect,
}

impl<T> Computed<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    /// Create a new computed signal from a derivation function.
    ///
    /// The derivation runs immediately: once untracked to seed the cell
    /// (untracked so that constructing a computed inside another
    /// computation does not leak this computed's dependencies into the
    /// outer tracker), then once under the owning effect to establish the
    /// dependency set.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let compute = Arc::new(compute);

        let cell = Signal::new(untracked(|| compute()));

        let effect = {
            let cell = cell.clone();
            let compute = Arc::clone(&compute);
            Effect::new(move || cell.set(compute()))
        };

        Self { cell, effect }
    }

    /// Get the computed's unique ID (the inner cell's ID).
    pub fn id(&self) -> u64 {
        self.cell.id()
    }

    /// Get the current value.
    ///
    /// Registers the active tracker as a dependent of this computed, just
    /// like a signal read.
    pub fn get(&self) -> T {
        self.cell.get()
    }

    /// Get the current value without registering any dependency.
    pub fn peek(&self) -> T {
        self.cell.peek()
    }

    /// Rejected: computed signals are read-only.
    ///
    /// Logs a diagnostic and leaves the value unchanged. Use
    /// [`try_set`](Computed::try_set) to get the rejection as an error.
    pub fn set(&self, value: T) {
        if let Err(error) = self.try_set(value) {
            warn!(computed = self.cell.id(), %error, "ignoring write");
        }
    }

    /// Attempt a write, which always fails with
    /// [`ReactiveError::ReadOnlyWrite`].
    pub fn try_set(&self, _value: T) -> Result<(), ReactiveError> {
        Err(ReactiveError::ReadOnlyWrite)
    }

    /// Register a plain callback, invoked whenever a recompute produces a
    /// non-identical value. Returns an idempotent unsubscribe function.
    pub fn subscribe<F>(&self, callback: F) -> impl Fn() + Send + Sync
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.cell.subscribe(callback)
    }

    /// Get the number of subscribers on the computed's cell.
    pub fn subscriber_count(&self) -> usize {
        self.cell.subscriber_count()
    }

    /// Get the number of signals the derivation currently depends on.
    pub fn dependency_count(&self) -> usize {
        self.effect.dependency_count()
    }
}

impl<T> Clone for Computed<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            effect: self.effect.clone(),
        }
    }
}

impl<T> Debug for Computed<T>
where
    T: Clone + Send + Sync + Identity + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Computed")
            .field("id", &self.cell.id())
            .field("value", &self.peek())
            .field("dependency_count", &self.dependency_count())
            .finish()
    }
}
