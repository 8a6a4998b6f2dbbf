//! Effect Implementation
//!
//! An Effect is a re-runnable computation that automatically discovers which
//! signals it reads and re-executes whenever any of them change.
//!
//! # How Effects Work
//!
//! 1. When created, the effect runs its body immediately to establish
//!    initial dependencies.
//!
//! 2. When any dependency changes, the effect re-runs synchronously as part
//!    of the write that changed it.
//!
//! 3. Before each run, the effect erases itself from every subscriber set
//!    it was registered in, then re-registers during execution as signals
//!    are read.
//!
//! # Cleanup Discipline
//!
//! The cleanup-before-track step is what makes conditional dependencies
//! correct. If an effect reads signal A only when some condition holds, and
//! on a later run the condition no longer holds, the stale subscription to
//! A must vanish — otherwise the effect keeps re-running for changes it no
//! longer cares about. After any execution, the effect's dependency list is
//! exactly the set of signals read during that execution.
//!
//! # Disposal
//!
//! [`Effect::dispose`] performs the cleanup step without re-running: the
//! effect is erased from every subscriber set and becomes permanently
//! inert. Since subscriber sets hold effects strongly, disposal is also
//! what releases the effect's closure and captured state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use smallvec::SmallVec;
use tracing::trace;

use super::context::{TrackerFrame, TrackerGuard};
use super::subscriber::{SubscriberId, SubscriberSet};

/// Weak back-references to the subscriber sets this effect is currently
/// registered in. Most effects read only a handful of signals.
type DependencyList = SmallVec<[Weak<SubscriberSet>; 4]>;

/// Shared state of an effect: the body plus dependency bookkeeping.
///
/// Subscriber sets hold this strongly; the tracking stack and the
/// dependency back-references hold it weakly.
pub(crate) struct EffectInner {
    /// The subscriber ID under which this effect registers on signals.
    id: SubscriberId,

    /// The effect body.
    run: Box<dyn Fn() + Send + Sync>,

    /// Subscriber sets this effect is registered in, refreshed on each run.
    deps: RwLock<DependencyList>,

    /// Set once by `dispose`; a disposed effect never runs again.
    disposed: AtomicBool,

    /// Number of times the body has run.
    run_count: AtomicUsize,
}

impl EffectInner {
    pub(crate) fn id(&self) -> SubscriberId {
        self.id
    }

    /// Record that this effect is now registered in `set`.
    ///
    /// Called by signals during dependency tracking, only when the
    /// registration was actually new.
    pub(crate) fn add_dependency(&self, set: Weak<SubscriberSet>) {
        self.deps.write().push(set);
    }

    /// Erase this effect from every subscriber set it is registered in,
    /// then clear the dependency list.
    fn clear_dependencies(&self) {
        let deps = std::mem::take(&mut *self.deps.write());
        for set in deps {
            if let Some(set) = set.upgrade() {
                set.write().shift_remove(&self.id);
            }
        }
    }

    /// Run the effect body, re-establishing dependencies from scratch.
    ///
    /// Cleanup happens first, then the body runs under a tracker frame so
    /// every signal read re-registers this effect. The frame is popped by
    /// an RAII guard, so the tracking stack is restored even if the body
    /// panics.
    pub(crate) fn execute(self: Arc<Self>) {
        if self.disposed.load(Ordering::SeqCst) {
            return;
        }

        self.clear_dependencies();

        trace!(effect = ?self.id, "running effect");
        let _frame = TrackerGuard::enter(TrackerFrame::Computation(Arc::downgrade(&self)));
        self.run_count.fetch_add(1, Ordering::SeqCst);
        (self.run)();
    }
}

/// A re-runnable computation that tracks its own signal dependencies.
///
/// # Example
///
/// ```rust,ignore
/// let count = Signal::new(0);
///
/// let effect = Effect::new(move || {
///     println!("Count is: {}", count.get());
/// });
///
/// count.set(5);  // Prints: "Count is: 5"
/// effect.dispose();
/// count.set(6);  // Prints nothing
/// ```
pub struct Effect {
    inner: Arc<EffectInner>,
}

impl Effect {
    /// Create a new effect with the given body.
    ///
    /// The body runs immediately to establish initial dependencies.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let inner = Arc::new(EffectInner {
            id: SubscriberId::new(),
            run: Box::new(run),
            deps: RwLock::new(DependencyList::new()),
            disposed: AtomicBool::new(false),
            run_count: AtomicUsize::new(0),
        });

        // Eager first run
        inner.clone().execute();

        Self { inner }
    }

    /// Get the subscriber ID for this effect.
    pub fn subscriber_id(&self) -> SubscriberId {
        self.inner.id
    }

    /// Dispose of the effect.
    ///
    /// Removes the effect from every tracked signal without re-running it.
    /// After disposal the effect is permanently inert; no subsequent write
    /// to any formerly-tracked signal invokes it again. Calling `dispose`
    /// more than once is a no-op.
    pub fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        trace!(effect = ?self.inner.id, "disposing effect");
        self.inner.clear_dependencies();
    }

    /// Check if the effect has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::SeqCst)
    }

    /// Get the number of times the body has run.
    pub fn run_count(&self) -> usize {
        self.inner.run_count.load(Ordering::SeqCst)
    }

    /// Get the number of subscriber sets this effect is registered in.
    ///
    /// Counts live signals only: a tracked signal dropped since the last
    /// run leaves a dead back-reference behind, which is excluded here and
    /// swept by the next cleanup pass.
    pub fn dependency_count(&self) -> usize {
        self.inner
            .deps
            .read()
            .iter()
            .filter(|set| set.strong_count() > 0)
            .count()
    }
}

impl Clone for Effect {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect")
            .field("id", &self.inner.id)
            .field("run_count", &self.run_count())
            .field("dependency_count", &self.dependency_count())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
