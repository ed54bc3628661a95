// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Pin descriptors.
//!
//! A pin is a named, typed communication endpoint on a controller. It has a
//! unique name within the hub, an I/O direction, a [`TypeSchema`] describing
//! the values it carries, and optional human-readable metadata. Pins are
//! plain values; identity and validity are enforced at the hub boundary.

use crate::schema::TypeSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// I/O direction of a pin, from the controller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IoMode {
    In,
    Out,
    InOut,
}

/// Named, typed communication endpoint.
///
/// Equality and hashing are structural over all fields. The wire form always
/// carries `name`, `mode` and `type`; `mnemonic` and `description` are
/// omitted when absent.
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct Pin {
    name: String,
    mode: IoMode,
    #[serde(rename = "type")]
    schema: TypeSchema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mnemonic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Pin {
    pub fn new(name: impl Into<String>, mode: IoMode, schema: TypeSchema) -> Self {
        Self {
            name: name.into(),
            mode,
            schema,
            mnemonic: None,
            description: None,
        }
    }

    /// Set a short mnemonic label.
    pub fn with_mnemonic(mut self, mnemonic: impl Into<String>) -> Self {
        self.mnemonic = Some(mnemonic.into());
        self
    }

    /// Set a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> IoMode {
        self.mode
    }

    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    pub fn mnemonic(&self) -> Option<&str> {
        self.mnemonic.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "<pin {}>", self.name),
        }
    }
}
