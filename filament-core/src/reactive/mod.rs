//! Reactive Primitives
//!
//! This module implements the core reactive system: signals, computed
//! signals, and effects. These primitives form the foundation of Filament's
//! fine-grained reactivity.
//!
//! # Concepts
//!
//! ## Signals
//!
//! A [`Signal`] is a container for mutable state. When a signal's value is
//! read within a tracking context (an effect or computed), the signal
//! automatically registers that context as a subscriber. When the value
//! changes, subscribers are notified synchronously; writes whose new value
//! is identical to the old one are suppressed entirely.
//!
//! ## Effects
//!
//! An [`Effect`] is a side-effecting computation that re-runs whenever one
//! of its dependencies changes. Before each run it erases its previous
//! subscriptions and re-discovers them from scratch, so conditional reads
//! stay accurate. Effects are used to synchronize reactive state with
//! external systems.
//!
//! ## Computed Signals
//!
//! A [`Computed`] is a read-only signal kept current by an internally owned
//! effect: its value is recomputed eagerly and synchronously on every
//! relevant write and is never stale.
//!
//! # Implementation Notes
//!
//! Dependency discovery uses a thread-local stack of tracker frames. When a
//! signal is read, the top frame (if any) is registered in the signal's
//! subscriber set. This approach (sometimes called "automatic dependency
//! tracking" or "transparent reactivity") is used by SolidJS, Vue 3, and
//! Leptos.
//!
//! Propagation is strictly synchronous and single-pass; coalescing of
//! notifications is delegated to a host-supplied collaborator (see
//! [`batch`]).

pub mod batch;
mod computed;
mod context;
mod effect;
mod error;
mod identity;
mod signal;
mod source;
mod subscriber;

pub use computed::Computed;
pub use context::{is_tracking, track, untracked};
pub use effect::Effect;
pub use error::ReactiveError;
pub use identity::Identity;
pub use signal::{signal, ReadSignal, Signal, WriteSignal};
pub use source::Source;
pub use subscriber::SubscriberId;
