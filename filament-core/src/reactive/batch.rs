//! Batching Collaborator
//!
//! The engine never implements a batching policy of its own. Coalescing
//! multiple synchronous notifications into one downstream flush belongs to
//! the host rendering layer, which injects a collaborator here. When one is
//! installed, every signal wraps its notification pass in it:
//!
//! ```rust,ignore
//! batch::install(|flush| {
//!     host_scheduler.batch_updates(|| flush());
//! });
//! ```
//!
//! The collaborator receives the flush closure and must call it exactly
//! once; what it does around that call (deferring paints, suspending
//! layout) is entirely the host's business.
//!
//! Installation is per thread, matching the thread-local tracking context:
//! each thread that runs reactive code installs its own collaborator.

use std::cell::RefCell;
use std::sync::Arc;

/// The injected collaborator: called with the notification flush for one
/// write, which it must invoke exactly once.
pub type BatchCollaborator = Arc<dyn Fn(&dyn Fn())>;

thread_local! {
    static COLLABORATOR: RefCell<Option<BatchCollaborator>> = const { RefCell::new(None) };
}

/// Install the host's batching collaborator for the current thread.
///
/// Replaces any previously installed collaborator.
pub fn install(collaborator: impl Fn(&dyn Fn()) + 'static) {
    COLLABORATOR.with(|slot| {
        *slot.borrow_mut() = Some(Arc::new(collaborator));
    });
}

/// Remove the installed collaborator, if any. Subsequent notification
/// passes run unbatched.
pub fn clear() {
    COLLABORATOR.with(|slot| {
        *slot.borrow_mut() = None;
    });
}

/// Get the currently installed collaborator, if any.
pub(crate) fn collaborator() -> Option<BatchCollaborator> {
    COLLABORATOR.with(|slot| slot.borrow().clone())
}
