// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Local listener callbacks for pin value changes.
//!
//! Listeners are in-process subscribers, invoked synchronously by the hub
//! after an inbound update has been extracted into canonical form. They may
//! be called from the transport's event-delivery thread, so implementations
//! must be `Send + Sync` and should not block.

use crate::pin::Pin;
use crate::schema::PinValue;

/// Local subscriber to a pin's value changes.
///
/// Registered per pin via [`crate::hub::PinHub::add_listener`]; a given
/// handle is attached to a pin at most once.
pub trait PinListener: Send + Sync {
    /// Called whenever a watched pin's value changed.
    fn value_changed(&self, pin: &Pin, value: &PinValue);
}

/// Closure-based listener for simple callbacks.
///
/// # Example
///
/// ```rust
/// use pinhub::hub::ClosureListener;
///
/// let listener = ClosureListener::new(|pin, value| {
///     println!("{} changed to {:?}", pin.name(), value);
/// });
/// ```
pub struct ClosureListener<F: Fn(&Pin, &PinValue) + Send + Sync> {
    callback: F,
}

impl<F: Fn(&Pin, &PinValue) + Send + Sync> ClosureListener<F> {
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F: Fn(&Pin, &PinValue) + Send + Sync> PinListener for ClosureListener<F> {
    fn value_changed(&self, pin: &Pin, value: &PinValue) {
        (self.callback)(pin, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::IoMode;
    use crate::schema::TypeSchema;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_closure_listener() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let listener = ClosureListener::new(move |_pin, _value| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        let pin = Pin::new("btn", IoMode::In, TypeSchema::bit().clone());
        let value = PinValue::Discrete(1);
        listener.value_changed(&pin, &value);
        listener.value_changed(&pin, &value);

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
