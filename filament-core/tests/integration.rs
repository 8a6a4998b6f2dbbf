//! Integration Tests for Reactive System
//!
//! These tests verify that signals, computed signals, and effects work
//! together correctly: dependency discovery, synchronous propagation,
//! conditional dependencies, disposal, and batching.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use filament_core::reactive::{batch, signal, track, untracked, Computed, Effect, Signal};

/// A shared append-only log for observing effect executions in order.
type Log = Arc<Mutex<Vec<i32>>>;

fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

/// Signal + effect: eager first run, re-run on change, suppression on
/// identical write.
#[test]
fn effect_logs_signal_values() {
    let a = Signal::new(1);
    let observed = log();

    let effect = {
        let (a, observed) = (a.clone(), observed.clone());
        Effect::new(move || observed.lock().push(a.get()))
    };

    // Eager first run
    assert_eq!(*observed.lock(), vec![1]);

    a.set(2);
    assert_eq!(*observed.lock(), vec![1, 2]);

    // Identical write: no re-run
    a.set(2);
    assert_eq!(*observed.lock(), vec![1, 2]);

    effect.dispose();
}

/// Computed over two signals stays fresh after every write, with no
/// explicit recompute call.
#[test]
fn computed_sum_is_always_fresh() {
    let a = Signal::new(2);
    let b = Signal::new(3);

    let sum = {
        let (a, b) = (a.clone(), b.clone());
        Computed::new(move || a.get() + b.get())
    };

    assert_eq!(sum.peek(), 5);

    a.set(10);
    assert_eq!(sum.peek(), 13);

    b.set(-10);
    assert_eq!(sum.peek(), 0);
}

/// Conditional dependency: once the branch flips, writes to the abandoned
/// signal must no longer re-trigger the effect.
#[test]
fn conditional_dependencies_are_cleaned_up() {
    let flag = Signal::new(true);
    let x = Signal::new(1);
    let y = Signal::new(2);
    let run_count = Arc::new(AtomicI32::new(0));

    let effect = {
        let (flag, x, y) = (flag.clone(), x.clone(), y.clone());
        let run_count = run_count.clone();
        Effect::new(move || {
            run_count.fetch_add(1, Ordering::SeqCst);
            let _ = if flag.get() { x.get() } else { y.get() };
        })
    };

    assert_eq!(run_count.load(Ordering::SeqCst), 1);
    assert_eq!(effect.dependency_count(), 2); // flag + x
    assert_eq!(y.subscriber_count(), 0);

    // Flip the branch: effect now reads flag + y
    flag.set(false);
    assert_eq!(run_count.load(Ordering::SeqCst), 2);
    assert_eq!(x.subscriber_count(), 0);
    assert_eq!(y.subscriber_count(), 1);

    // x is stale; writing it must not re-trigger
    x.set(100);
    assert_eq!(run_count.load(Ordering::SeqCst), 2);

    // y is live; writing it must re-trigger
    y.set(200);
    assert_eq!(run_count.load(Ordering::SeqCst), 3);
}

/// After any execution, the dependency edges match exactly the signals read
/// during that execution.
#[test]
fn dependency_sets_match_reads_exactly() {
    let a = Signal::new(0);
    let b = Signal::new(0);

    let effect = {
        let (a, b) = (a.clone(), b.clone());
        Effect::new(move || {
            // a read twice, b once: still one edge each
            let _ = a.get() + a.get() + b.get();
        })
    };

    assert_eq!(effect.dependency_count(), 2);
    assert_eq!(a.subscriber_count(), 1);
    assert_eq!(b.subscriber_count(), 1);

    // Re-running (via a write) rebuilds the same edges, without duplicates
    a.set(1);
    assert_eq!(effect.dependency_count(), 2);
    assert_eq!(a.subscriber_count(), 1);
    assert_eq!(b.subscriber_count(), 1);
}

/// Disposal removes the effect from every formerly-tracked signal.
#[test]
fn disposed_effect_never_runs_again() {
    let a = Signal::new(0);
    let b = Signal::new(0);
    let run_count = Arc::new(AtomicI32::new(0));

    let effect = {
        let (a, b) = (a.clone(), b.clone());
        let run_count = run_count.clone();
        Effect::new(move || {
            run_count.fetch_add(1, Ordering::SeqCst);
            let _ = a.get() + b.get();
        })
    };

    assert_eq!(run_count.load(Ordering::SeqCst), 1);

    effect.dispose();
    assert_eq!(a.subscriber_count(), 0);
    assert_eq!(b.subscriber_count(), 0);

    a.set(1);
    b.set(1);
    assert_eq!(run_count.load(Ordering::SeqCst), 1);
}

/// Computed signals can depend on other computed signals.
#[test]
fn computed_chains_propagate_synchronously() {
    let base = Signal::new(1);

    let doubled = {
        let base = base.clone();
        Computed::new(move || base.get() * 2)
    };
    let quadrupled = {
        let doubled = doubled.clone();
        Computed::new(move || doubled.get() * 2)
    };

    assert_eq!(quadrupled.peek(), 4);

    base.set(5);
    assert_eq!(doubled.peek(), 10);
    assert_eq!(quadrupled.peek(), 20);
}

/// An effect that constructs a computed mid-run keeps tracking its own
/// reads after the inner computation finishes (tracker stack, not slot).
#[test]
fn nested_computations_restore_outer_tracking() {
    let first = Signal::new(1);
    let second = Signal::new(10);
    let run_count = Arc::new(AtomicI32::new(0));

    let effect = {
        let (first, second) = (first.clone(), second.clone());
        let run_count = run_count.clone();
        Effect::new(move || {
            run_count.fetch_add(1, Ordering::SeqCst);
            let _ = first.get();

            // Inner computation runs with its own tracker frame
            let inner_base = Signal::new(2);
            let inner = {
                let inner_base = inner_base.clone();
                Computed::new(move || inner_base.get() * 2)
            };
            assert_eq!(inner.peek(), 4);

            // Reads after the inner computation must still register
            let _ = second.get();
        })
    };

    assert_eq!(effect.dependency_count(), 2);

    // The read after the nested computation was tracked for the outer effect
    second.set(20);
    assert_eq!(run_count.load(Ordering::SeqCst), 2);

    effect.dispose();
}

/// Reads wrapped in `untracked` register nothing, even inside an effect.
#[test]
fn untracked_reads_are_not_dependencies() {
    let tracked = Signal::new(1);
    let ignored = Signal::new(2);
    let run_count = Arc::new(AtomicI32::new(0));

    let _effect = {
        let (tracked, ignored) = (tracked.clone(), ignored.clone());
        let run_count = run_count.clone();
        Effect::new(move || {
            run_count.fetch_add(1, Ordering::SeqCst);
            let _ = tracked.get();
            let _ = untracked(|| ignored.get());
        })
    };

    assert_eq!(ignored.subscriber_count(), 0);

    ignored.set(3);
    assert_eq!(run_count.load(Ordering::SeqCst), 1);

    tracked.set(4);
    assert_eq!(run_count.load(Ordering::SeqCst), 2);
}

/// One-shot `track` registers the tracker on every signal read inside.
#[test]
fn track_registers_on_all_reads() {
    let a = Signal::new(1);
    let b = Signal::new(2);
    let notify_count = Arc::new(AtomicI32::new(0));

    {
        let (a, b) = (a.clone(), b.clone());
        let notify_count = notify_count.clone();
        track(
            move || {
                notify_count.fetch_add(1, Ordering::SeqCst);
            },
            move || {
                let _ = a.get() + b.get();
            },
        );
    }

    assert_eq!(a.subscriber_count(), 1);
    assert_eq!(b.subscriber_count(), 1);

    a.set(10);
    assert_eq!(notify_count.load(Ordering::SeqCst), 1);
    b.set(20);
    assert_eq!(notify_count.load(Ordering::SeqCst), 2);
}

/// A subscriber writing to a *different* signal during notification works;
/// the inner write completes its own pass before the outer one resumes.
#[test]
fn subscriber_may_write_other_signals() {
    let source = Signal::new(0);
    let mirror = Signal::new(0);
    let mirror_log = log();

    let _mirror_effect = {
        let (mirror, mirror_log) = (mirror.clone(), mirror_log.clone());
        Effect::new(move || mirror_log.lock().push(mirror.get()))
    };

    let _copy_effect = {
        let (source, mirror) = (source.clone(), mirror.clone());
        Effect::new(move || mirror.set(source.get()))
    };

    source.set(7);
    assert_eq!(mirror.peek(), 7);
    assert_eq!(*mirror_log.lock(), vec![0, 7]);
}

/// The batching collaborator wraps each notification pass; the engine
/// itself never batches.
#[test]
fn batching_collaborator_wraps_notification() {
    let wrapped = Arc::new(AtomicI32::new(0));
    let wrapped_clone = wrapped.clone();
    batch::install(move |flush| {
        wrapped_clone.fetch_add(1, Ordering::SeqCst);
        flush();
    });

    let sig = Signal::new(0);
    let first = Arc::new(AtomicI32::new(0));
    let second = Arc::new(AtomicI32::new(0));

    let first_clone = first.clone();
    let _unsub_first = sig.subscribe(move || {
        first_clone.fetch_add(1, Ordering::SeqCst);
    });
    let second_clone = second.clone();
    let _unsub_second = sig.subscribe(move || {
        second_clone.fetch_add(1, Ordering::SeqCst);
    });

    sig.set(1);

    // One flush for the write, both subscribers ran inside it
    assert_eq!(wrapped.load(Ordering::SeqCst), 1);
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);

    // Suppressed writes never reach the collaborator
    sig.set(1);
    assert_eq!(wrapped.load(Ordering::SeqCst), 1);

    batch::clear();
}

/// The split-handle adapter drives the same engine as the full Signal.
#[test]
fn split_handles_participate_in_tracking() {
    let (count, set_count) = signal(0);
    let observed = log();

    let _effect = {
        let (count, observed) = (count.clone(), observed.clone());
        Effect::new(move || observed.lock().push(count.get()))
    };

    set_count.set(1);
    set_count.update(|v| v + 1);
    assert_eq!(*observed.lock(), vec![0, 1, 2]);
}

/// A panicking subscriber aborts the remaining notifications for that
/// write; the panic reaches the `set` caller and the tracking stack is
/// left balanced.
#[test]
fn panicking_subscriber_aborts_remaining_notifications() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let sig = Signal::new(0);
    let first = Arc::new(AtomicI32::new(0));
    let third = Arc::new(AtomicI32::new(0));

    let first_clone = first.clone();
    let _unsub_first = sig.subscribe(move || {
        first_clone.fetch_add(1, Ordering::SeqCst);
    });
    let _unsub_second = sig.subscribe(|| panic!("subscriber failure"));
    let third_clone = third.clone();
    let _unsub_third = sig.subscribe(move || {
        third_clone.fetch_add(1, Ordering::SeqCst);
    });

    let result = catch_unwind(AssertUnwindSafe(|| sig.set(1)));
    assert!(result.is_err());

    // The write itself landed, the first subscriber ran, the third was
    // never reached for this write.
    assert_eq!(sig.peek(), 1);
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(third.load(Ordering::SeqCst), 0);
    assert!(!filament_core::reactive::is_tracking());

    // The engine is not poisoned: a later write notifies everyone again
    // (including the panicker, so catch once more).
    let result = catch_unwind(AssertUnwindSafe(|| sig.set(2)));
    assert!(result.is_err());
    assert_eq!(first.load(Ordering::SeqCst), 2);
}

/// Subscribers are notified in insertion order.
#[test]
fn notification_runs_in_insertion_order() {
    let sig = Signal::new(0);
    let order = log();

    for label in 1..=3 {
        let order = order.clone();
        // Dropping the unsubscribe handle leaves the subscription in place
        let _ = sig.subscribe(move || order.lock().push(label));
    }

    sig.set(1);
    assert_eq!(*order.lock(), vec![1, 2, 3]);

    sig.set(2);
    assert_eq!(*order.lock(), vec![1, 2, 3, 1, 2, 3]);
}
