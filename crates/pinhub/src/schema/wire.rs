// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON wire representation for schemas.
//!
//! The wire form is a flat object with a `baseType` tag and shape-specific
//! optional fields. `baseType` is always emitted; absent ranges are omitted
//! entirely rather than serialized as null. Deserialization funnels through
//! [`WireSchema`], which validates that the shape-specific fields required
//! by the tag are present and coherent.

use crate::schema::{BaseType, FloatRange, IntRange, TypeSchema};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

pub const BASE_TYPE_KEY: &str = "baseType";
pub const DISCRETE_RANGE_START_KEY: &str = "discreteRangeStart";
pub const DISCRETE_RANGE_SIZE_KEY: &str = "discreteRangeSize";
pub const CONTINUOUS_RANGE_START_KEY: &str = "continuousRangeStart";
pub const CONTINUOUS_RANGE_SIZE_KEY: &str = "continuousRangeSize";
pub const DIMENSION_KEY: &str = "dimension";
pub const ELEMENT_TYPE_KEY: &str = "elementType";
pub const FIELDS_KEY: &str = "fields";

/// Flat wire image of a [`TypeSchema`].
#[derive(Debug, Serialize, Deserialize)]
struct WireSchema {
    #[serde(rename = "baseType", default)]
    base_type: Option<BaseType>,
    #[serde(
        rename = "discreteRangeStart",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    discrete_range_start: Option<i64>,
    #[serde(
        rename = "discreteRangeSize",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    discrete_range_size: Option<i64>,
    #[serde(
        rename = "continuousRangeStart",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    continuous_range_start: Option<f64>,
    #[serde(
        rename = "continuousRangeSize",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    continuous_range_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dimension: Option<u64>,
    #[serde(rename = "elementType", default, skip_serializing_if = "Option::is_none")]
    element_type: Option<Box<WireSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, WireSchema>>,
}

impl WireSchema {
    fn empty() -> Self {
        Self {
            base_type: None,
            discrete_range_start: None,
            discrete_range_size: None,
            continuous_range_start: None,
            continuous_range_size: None,
            dimension: None,
            element_type: None,
            fields: None,
        }
    }
}

impl From<&TypeSchema> for WireSchema {
    fn from(schema: &TypeSchema) -> Self {
        let mut wire = WireSchema::empty();
        wire.base_type = Some(schema.base_type());
        match schema {
            TypeSchema::Discrete { range } => {
                if let Some(range) = range {
                    wire.discrete_range_start = Some(range.start);
                    wire.discrete_range_size = Some(range.size);
                }
            }
            TypeSchema::Continuous { range } => {
                if let Some(range) = range {
                    wire.continuous_range_start = Some(range.start);
                    wire.continuous_range_size = Some(range.size);
                }
            }
            TypeSchema::Array { element, dimension } => {
                wire.dimension = Some(*dimension as u64);
                wire.element_type = Some(Box::new(WireSchema::from(element.as_ref())));
            }
            TypeSchema::Structured { fields } => {
                wire.fields = Some(
                    fields
                        .iter()
                        .map(|(name, schema)| (name.clone(), WireSchema::from(schema)))
                        .collect(),
                );
            }
        }
        wire
    }
}

impl TryFrom<WireSchema> for TypeSchema {
    type Error = String;

    fn try_from(wire: WireSchema) -> Result<Self, Self::Error> {
        let base = wire.base_type.ok_or("missing baseType")?;
        match base {
            BaseType::Discrete => {
                let range = match (wire.discrete_range_start, wire.discrete_range_size) {
                    (Some(start), Some(size)) => Some(IntRange::new(start, size)),
                    (None, None) => None,
                    _ => return Err("discrete range requires both start and size".to_string()),
                };
                Ok(TypeSchema::Discrete { range })
            }
            BaseType::Continuous => {
                let range = match (wire.continuous_range_start, wire.continuous_range_size) {
                    (Some(start), Some(size)) => Some(FloatRange::new(start, size)),
                    (None, None) => None,
                    _ => return Err("continuous range requires both start and size".to_string()),
                };
                Ok(TypeSchema::Continuous { range })
            }
            BaseType::Array => {
                let dimension = wire.dimension.ok_or("array type requires a dimension")?;
                let dimension = usize::try_from(dimension)
                    .map_err(|_| format!("array dimension {} is out of range", dimension))?;
                let element = wire
                    .element_type
                    .ok_or("array type requires an element type")?;
                Ok(TypeSchema::Array {
                    element: Box::new(TypeSchema::try_from(*element)?),
                    dimension,
                })
            }
            BaseType::Structured => {
                let fields = wire.fields.ok_or("structured type requires fields")?;
                if fields.is_empty() {
                    return Err("structured type requires at least one field".to_string());
                }
                let mut out = BTreeMap::new();
                for (name, field) in fields {
                    out.insert(name, TypeSchema::try_from(field)?);
                }
                Ok(TypeSchema::Structured { fields: out })
            }
        }
    }
}

impl Serialize for TypeSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireSchema::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TypeSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireSchema::deserialize(deserializer)?;
        TypeSchema::try_from(wire).map_err(de::Error::custom)
    }
}
