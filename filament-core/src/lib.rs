//! Filament Core
//!
//! This crate provides the reactive signal engine for the Filament UI
//! framework: mutable reactive cells (signals), derived read-only cells
//! (computed signals), and reactive computations (effects) that discover
//! their own data dependencies and re-run exactly when those dependencies
//! change.
//!
//! Everything higher-level (conditional rendering, list rendering, timers,
//! bindings) is built on top of this engine and lives elsewhere; this crate
//! deliberately contains no rendering, scheduling, or transport code. The
//! host's update batching is consumed as an injected collaborator, see
//! [`reactive::batch`].
//!
//! # Example
//!
//! ```rust,ignore
//! use filament_core::reactive::{Computed, Effect, Signal};
//!
//! // Create a signal
//! let count = Signal::new(0);
//!
//! // Create a derived value
//! let doubled = {
//!     let count = count.clone();
//!     Computed::new(move || count.get() * 2)
//! };
//!
//! // Create an effect
//! let effect = {
//!     let (count, doubled) = (count.clone(), doubled.clone());
//!     Effect::new(move || {
//!         println!("Count: {}, Doubled: {}", count.get(), doubled.get());
//!     })
//! };
//!
//! // Update the signal
//! count.set(5);
//! // Effect re-runs synchronously, prints: "Count: 5, Doubled: 10"
//!
//! effect.dispose();
//! ```

pub mod reactive;
