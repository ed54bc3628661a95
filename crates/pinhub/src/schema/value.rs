// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Canonical and source value types for extraction.

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Canonical value produced by a successful extraction.
///
/// Every integral source normalizes to `i64`, every floating source to
/// `f64`; containers are freshly built and never alias the input.
#[derive(Debug, Clone, PartialEq)]
pub enum PinValue {
    Discrete(i64),
    Continuous(f64),
    Array(Vec<PinValue>),
    Structured(BTreeMap<String, PinValue>),
}

impl PinValue {
    /// Try to get as a canonical integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Discrete(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as a canonical float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Continuous(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as an array.
    pub fn as_slice(&self) -> Option<&[PinValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get a structure field.
    pub fn field(&self, name: &str) -> Option<&PinValue> {
        match self {
            Self::Structured(fields) => fields.get(name),
            _ => None,
        }
    }

    /// Render as a plain JSON tree (the `update` event payload format).
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Discrete(v) => JsonValue::from(*v),
            Self::Continuous(v) => JsonValue::from(*v),
            Self::Array(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Structured(fields) => JsonValue::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl Serialize for PinValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Discrete(v) => serializer.serialize_i64(*v),
            Self::Continuous(v) => serializer.serialize_f64(*v),
            Self::Array(items) => items.serialize(serializer),
            Self::Structured(fields) => fields.serialize(serializer),
        }
    }
}

/// Source value accepted by extraction: a closed variant over native scalars,
/// native collections, and generic JSON tree nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Int(i64),
    Float(f64),
    Seq(Vec<RawValue>),
    Map(BTreeMap<String, RawValue>),
    /// Generic tree node, e.g. a parsed inbound `update` payload.
    Json(JsonValue),
}

impl RawValue {
    /// True for an absent value (a JSON `null` node).
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Json(JsonValue::Null))
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for RawValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for RawValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(items: Vec<T>) -> Self {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<RawValue>> From<BTreeMap<String, T>> for RawValue {
    fn from(fields: BTreeMap<String, T>) -> Self {
        Self::Map(
            fields
                .into_iter()
                .map(|(name, value)| (name, value.into()))
                .collect(),
        )
    }
}

impl From<JsonValue> for RawValue {
    fn from(node: JsonValue) -> Self {
        Self::Json(node)
    }
}

/// Canonical values are themselves acceptable sources, which makes
/// re-extraction a no-op for already-extracted data.
impl From<PinValue> for RawValue {
    fn from(value: PinValue) -> Self {
        match value {
            PinValue::Discrete(v) => Self::Int(v),
            PinValue::Continuous(v) => Self::Float(v),
            PinValue::Array(items) => Self::Seq(items.into_iter().map(Into::into).collect()),
            PinValue::Structured(fields) => Self::Map(
                fields
                    .into_iter()
                    .map(|(name, value)| (name, value.into()))
                    .collect(),
            ),
        }
    }
}

impl From<&PinValue> for RawValue {
    fn from(value: &PinValue) -> Self {
        value.clone().into()
    }
}
