//! Tracking Context
//!
//! The tracking context records which computation is currently reading
//! signals. This enables automatic dependency discovery: when a signal is
//! read, it registers the current tracker as a subscriber.
//!
//! # Implementation
//!
//! We use a thread-local stack of tracker frames. When a computation starts
//! executing (an effect body, a computed recompute, or a one-shot `track`
//! call), it pushes a frame; when it completes, the frame is popped by an
//! RAII guard, so the stack stays correct even if the body panics.
//!
//! The stack (rather than a single slot) is what makes nesting safe: a
//! computation that synchronously constructs and runs another computation
//! resumes its own tracking once the inner one finishes.

use std::cell::RefCell;
use std::sync::{Arc, Weak};

use super::effect::EffectInner;
use super::subscriber::SubscriberId;

thread_local! {
    static TRACKER_STACK: RefCell<Vec<TrackerFrame>> = RefCell::new(Vec::new());
}

/// A frame on the tracking stack: the computation currently reading signals.
#[derive(Clone)]
pub(crate) enum TrackerFrame {
    /// A full computation with cleanup-before-track dependency bookkeeping.
    /// Held weakly so the stack never extends an effect's lifetime.
    Computation(Weak<EffectInner>),

    /// A one-shot tracker callback installed by [`track`]. No dependency
    /// bookkeeping: the callback is registered on every signal read and
    /// stays registered until the signal itself goes away.
    Callback(SubscriberId, Arc<dyn Fn() + Send + Sync>),

    /// Masks any outer frame. Signals read under this frame register
    /// nothing. Installed by [`untracked`].
    Untracked,
}

/// Guard that pops the tracking stack when dropped.
///
/// Dropping on unwind keeps the stack consistent when a computation body
/// panics mid-read.
pub(crate) struct TrackerGuard {
    depth: usize,
}

impl TrackerGuard {
    /// Push `frame` onto the tracking stack for the current thread.
    ///
    /// The frame is popped when the returned guard is dropped.
    pub(crate) fn enter(frame: TrackerFrame) -> Self {
        let depth = TRACKER_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(frame);
            stack.len()
        });
        Self { depth }
    }
}

impl Drop for TrackerGuard {
    fn drop(&mut self) {
        TRACKER_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            debug_assert_eq!(
                stack.len(),
                self.depth,
                "tracker stack out of balance: expected depth {}, found {}",
                self.depth,
                stack.len()
            );
            stack.pop();
        });
    }
}

/// Get the tracker currently reading signals, if any.
///
/// Returns `None` both when the stack is empty and when the top frame is
/// `Untracked`.
pub(crate) fn current_tracker() -> Option<TrackerFrame> {
    TRACKER_STACK.with(|stack| match stack.borrow().last() {
        None | Some(TrackerFrame::Untracked) => None,
        Some(frame) => Some(frame.clone()),
    })
}

/// Check whether a tracker is currently active on this thread.
pub fn is_tracking() -> bool {
    current_tracker().is_some()
}

/// One-shot tracking: install `tracker` as the current tracker, run `read`
/// once, then restore the previous tracker.
///
/// Every signal read inside `read` registers `tracker` in its subscriber
/// set; the signal will call `tracker` on each subsequent change. Unlike
/// [`Effect`](super::Effect), there is no dependency bookkeeping and no
/// cleanup step: each call to `track` registers a fresh subscription on
/// every signal read, and nothing ever removes it. This is intended for
/// simple re-render glue whose subscriptions live as long as the signals
/// themselves; anything with a shorter lifecycle should use an `Effect`.
pub fn track(tracker: impl Fn() + Send + Sync + 'static, read: impl FnOnce()) {
    let frame = TrackerFrame::Callback(SubscriberId::new(), Arc::new(tracker));
    let _guard = TrackerGuard::enter(frame);
    read();
}

/// Run `f` with dependency tracking masked.
///
/// Signals read inside `f` register no subscriber, even when called from
/// within an effect body. Returns whatever `f` returns.
pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
    let _guard = TrackerGuard::enter(TrackerFrame::Untracked);
    f()
}
