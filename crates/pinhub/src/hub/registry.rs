// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrency-safe store of declared pins, keyed by unique name.

use crate::hub::{Error, Result};
use crate::pin::Pin;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Pin store with internal synchronization.
///
/// All operations take the internal lock, so no caller can observe a
/// partially updated registry. Lookups and listings return clones; the
/// registry owns no other state.
pub struct PinRegistry {
    pins: RwLock<HashMap<String, Pin>>,
}

impl PinRegistry {
    pub fn new() -> Self {
        Self {
            pins: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a pin, replacing any previous pin with the same name.
    pub fn put(&self, pin: Pin) -> Result<()> {
        if pin.name().is_empty() {
            return Err(Error::InvalidArgument(
                "pin must have a non-empty name".to_string(),
            ));
        }
        self.pins.write().insert(pin.name().to_string(), pin);
        Ok(())
    }

    /// Removes a pin by name; absent names are a no-op.
    pub fn remove(&self, name: &str) {
        self.pins.write().remove(name);
    }

    /// Exact lookup by name.
    pub fn find(&self, name: &str) -> Option<Pin> {
        self.pins.read().get(name).cloned()
    }

    /// Snapshot of all registered pins, in no significant order.
    pub fn list(&self) -> Vec<Pin> {
        self.pins.read().values().cloned().collect()
    }

    /// Drops every registered pin.
    pub fn clear(&self) {
        self.pins.write().clear();
    }

    pub fn len(&self) -> usize {
        self.pins.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.read().is_empty()
    }
}

impl Default for PinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::IoMode;
    use crate::schema::TypeSchema;

    fn pin(name: &str) -> Pin {
        Pin::new(name, IoMode::In, TypeSchema::bit().clone())
    }

    #[test]
    fn test_starts_empty() {
        let registry = PinRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.list().is_empty());
    }

    #[test]
    fn test_rejects_empty_name() {
        let registry = PinRegistry::new();
        assert!(matches!(
            registry.put(pin("")),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_put_remove_list_clear() {
        let registry = PinRegistry::new();
        registry.put(pin("pin1")).unwrap();
        registry.put(pin("pin2")).unwrap();
        registry.put(pin("pin3")).unwrap();
        assert_eq!(registry.len(), 3);

        registry.remove("pin1");
        let mut names: Vec<String> = registry
            .list()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, ["pin2", "pin3"]);

        // Removing an unknown name is a no-op.
        registry.remove("pin1");
        assert_eq!(registry.len(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_put_overwrites_by_name() {
        let registry = PinRegistry::new();
        registry.put(pin("pin1")).unwrap();
        registry
            .put(Pin::new("pin1", IoMode::Out, TypeSchema::uniform().clone()))
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("pin1").map(|p| p.mode()), Some(IoMode::Out));
    }

    #[test]
    fn test_find() {
        let registry = PinRegistry::new();
        registry.put(pin("pin1")).unwrap();
        assert_eq!(registry.find("pin1"), Some(pin("pin1")));
        assert_eq!(registry.find("pin2"), None);
    }
}
