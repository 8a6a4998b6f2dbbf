//! Signal-or-value inputs.
//!
//! Component-facing helpers often accept either a fixed value or a signal
//! for the same parameter. Rather than sniffing for signal-shaped methods
//! at the call site, [`Source`] makes the distinction an explicit sum type:
//! callers branch on the variant, and `From` impls keep construction
//! ergonomic on both sides.

use std::fmt::Debug;

use super::identity::Identity;
use super::signal::Signal;

/// Either a plain value or a live signal.
///
/// Reading a `Value` never registers a dependency; reading a `Signal`
/// behaves exactly like reading the signal directly.
pub enum Source<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    /// A fixed value. Reads always return it; nothing is ever tracked.
    Value(T),

    /// A live signal. Reads go through the signal, tracking included.
    Signal(Signal<T>),
}

impl<T> Source<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    /// Get the current value, registering the active tracker when this
    /// source is a signal.
    pub fn get(&self) -> T {
        match self {
            Source::Value(value) => value.clone(),
            Source::Signal(signal) => signal.get(),
        }
    }

    /// Get the current value without registering any dependency.
    pub fn peek(&self) -> T {
        match self {
            Source::Value(value) => value.clone(),
            Source::Signal(signal) => signal.peek(),
        }
    }

    /// Check whether this source can ever change.
    pub fn is_reactive(&self) -> bool {
        matches!(self, Source::Signal(_))
    }
}

impl<T> From<T> for Source<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    fn from(value: T) -> Self {
        Source::Value(value)
    }
}

impl<T> From<Signal<T>> for Source<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    fn from(signal: Signal<T>) -> Self {
        Source::Signal(signal)
    }
}

impl<T> Clone for Source<T>
where
    T: Clone + Send + Sync + Identity + 'static,
{
    fn clone(&self) -> Self {
        match self {
            Source::Value(value) => Source::Value(value.clone()),
            Source::Signal(signal) => Source::Signal(signal.clone()),
        }
    }
}

impl<T> Debug for Source<T>
where
    T: Clone + Send + Sync + Identity + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Value(value) => f.debug_tuple("Source::Value").field(value).finish(),
            Source::Signal(signal) => f.debug_tuple("Source::Signal").field(signal).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Effect;

    #[test]
    fn value_source_is_inert() {
        let source: Source<i32> = 5.into();
        assert!(!source.is_reactive());
        assert_eq!(source.get(), 5);
        assert_eq!(source.peek(), 5);
    }

    #[test]
    fn signal_source_reads_through() {
        let signal = Signal::new(1);
        let source: Source<i32> = signal.clone().into();

        assert!(source.is_reactive());
        assert_eq!(source.get(), 1);

        signal.set(2);
        assert_eq!(source.peek(), 2);
    }

    #[test]
    fn signal_source_tracks_inside_effect() {
        let signal = Signal::new(1);
        let source: Source<i32> = signal.clone().into();

        let effect = Effect::new(move || {
            let _ = source.get();
        });

        assert_eq!(effect.dependency_count(), 1);
        assert_eq!(signal.subscriber_count(), 1);
    }
}
