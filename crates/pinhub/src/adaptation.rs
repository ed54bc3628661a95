// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declarative type-adaptation descriptors.

use crate::schema::TypeSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Describes a named conversion between two pin types.
///
/// Pure data: the descriptor names an adapter and its parameters, and
/// optionally the source and target schemas it maps between. Executing the
/// conversion is the job of an external adapter engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adaptation {
    adapter: String,
    #[serde(rename = "sourceType", default, skip_serializing_if = "Option::is_none")]
    source_type: Option<TypeSchema>,
    #[serde(rename = "targetType", default, skip_serializing_if = "Option::is_none")]
    target_type: Option<TypeSchema>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    params: BTreeMap<String, JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mnemonic: Option<String>,
}

impl Adaptation {
    pub fn new(adapter: impl Into<String>) -> Self {
        Self {
            adapter: adapter.into(),
            source_type: None,
            target_type: None,
            params: BTreeMap::new(),
            mnemonic: None,
        }
    }

    pub fn with_source_type(mut self, schema: TypeSchema) -> Self {
        self.source_type = Some(schema);
        self
    }

    pub fn with_target_type(mut self, schema: TypeSchema) -> Self {
        self.target_type = Some(schema);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    pub fn with_mnemonic(mut self, mnemonic: impl Into<String>) -> Self {
        self.mnemonic = Some(mnemonic.into());
        self
    }

    pub fn adapter(&self) -> &str {
        &self.adapter
    }

    pub fn source_type(&self) -> Option<&TypeSchema> {
        self.source_type.as_ref()
    }

    pub fn target_type(&self) -> Option<&TypeSchema> {
        self.target_type.as_ref()
    }

    pub fn params(&self) -> &BTreeMap<String, JsonValue> {
        &self.params
    }

    pub fn mnemonic(&self) -> Option<&str> {
        self.mnemonic.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_form() {
        let adaptation = Adaptation::new("scale")
            .with_source_type(TypeSchema::continuous_range(0.0, 1024.0))
            .with_target_type(TypeSchema::uniform().clone())
            .with_param("factor", json!(0.5))
            .with_mnemonic("adc");

        assert_eq!(
            serde_json::to_value(&adaptation).unwrap(),
            json!({
                "adapter": "scale",
                "sourceType": {
                    "baseType": "CONTINUOUS",
                    "continuousRangeStart": 0.0,
                    "continuousRangeSize": 1024.0
                },
                "targetType": {
                    "baseType": "CONTINUOUS",
                    "continuousRangeStart": -1.0,
                    "continuousRangeSize": 2.0
                },
                "params": {"factor": 0.5},
                "mnemonic": "adc"
            })
        );
    }

    #[test]
    fn test_round_trip() {
        let adaptation = Adaptation::new("threshold").with_param("level", json!(0.75));
        let text = serde_json::to_string(&adaptation).unwrap();
        let back: Adaptation = serde_json::from_str(&text).unwrap();
        assert_eq!(back, adaptation);
    }

    #[test]
    fn test_minimal_wire_form_omits_empty_parts() {
        assert_eq!(
            serde_json::to_value(Adaptation::new("identity")).unwrap(),
            json!({"adapter": "identity"})
        );
    }
}
