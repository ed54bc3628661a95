// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value extraction: validating and coercing source values against a schema.
//!
//! Extraction dispatches over a borrowed [`SourceRef`] view that unifies
//! native [`RawValue`]s and JSON tree nodes, so nested JSON payloads are
//! walked without cloning the input. The result is always a freshly built
//! canonical [`PinValue`].

use crate::schema::{FloatRange, IntRange, PinValue, RawValue, TypeSchema};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

/// Errors raised while extracting a source value through a schema.
///
/// `InvalidSchema` flags an incoherent schema and is a configuration error;
/// every other variant is caused by untrusted input. Nested failures are
/// wrapped with positional or field context and keep the original cause
/// reachable through [`StdError::source`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// The schema itself cannot drive an extraction.
    InvalidSchema(String),
    /// The source value is absent.
    NullValue,
    /// A scalar fell outside the schema's declared range.
    OutOfRange(String),
    /// The source has the wrong kind or the wrong length.
    WrongShape { expected: String, got: String },
    /// A declared structure field is missing from the source.
    MissingField(String),
    /// An array element failed to extract.
    InvalidElement { index: usize, cause: Box<ExtractError> },
    /// A structure field failed to extract.
    InvalidField { field: String, cause: Box<ExtractError> },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSchema(msg) => write!(f, "invalid schema: {}", msg),
            Self::NullValue => write!(f, "value is missing"),
            Self::OutOfRange(msg) => write!(f, "value out of range: {}", msg),
            Self::WrongShape { expected, got } => {
                write!(f, "wrong shape: expected {}, got {}", expected, got)
            }
            Self::MissingField(name) => write!(f, "missing field '{}'", name),
            Self::InvalidElement { index, cause } => {
                write!(f, "invalid element at index {}: {}", index, cause)
            }
            Self::InvalidField { field, cause } => {
                write!(f, "invalid field '{}': {}", field, cause)
            }
        }
    }
}

impl StdError for ExtractError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidElement { cause, .. } | Self::InvalidField { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// Borrowed view over a source value, normalized so that a wrapped JSON node
/// is always seen through the `Json` arm.
#[derive(Clone, Copy)]
enum SourceRef<'a> {
    Native(&'a RawValue),
    Json(&'a JsonValue),
}

impl<'a> SourceRef<'a> {
    fn of(raw: &'a RawValue) -> Self {
        match raw {
            RawValue::Json(node) => Self::Json(node),
            other => Self::Native(other),
        }
    }

    fn is_null(self) -> bool {
        matches!(self, Self::Json(JsonValue::Null))
    }

    fn kind(self) -> &'static str {
        match self {
            Self::Native(RawValue::Int(_)) => "integer",
            Self::Native(RawValue::Float(_)) => "float",
            Self::Native(RawValue::Seq(_)) => "sequence",
            Self::Native(RawValue::Map(_)) => "object",
            Self::Native(RawValue::Json(node)) => Self::Json(node).kind(),
            Self::Json(JsonValue::Null) => "null",
            Self::Json(JsonValue::Bool(_)) => "boolean",
            Self::Json(JsonValue::Number(n)) => {
                if n.is_i64() {
                    "integer"
                } else {
                    "float"
                }
            }
            Self::Json(JsonValue::String(_)) => "string",
            Self::Json(JsonValue::Array(_)) => "sequence",
            Self::Json(JsonValue::Object(_)) => "object",
        }
    }

    fn as_int(self) -> Option<i64> {
        match self {
            Self::Native(RawValue::Int(v)) => Some(*v),
            Self::Json(JsonValue::Number(n)) => n.as_i64(),
            _ => None,
        }
    }

    fn as_float(self) -> Option<f64> {
        match self {
            Self::Native(RawValue::Int(v)) => Some(*v as f64),
            Self::Native(RawValue::Float(v)) => Some(*v),
            Self::Json(JsonValue::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    fn elements(self) -> Option<Vec<SourceRef<'a>>> {
        match self {
            Self::Native(RawValue::Seq(items)) => Some(items.iter().map(SourceRef::of).collect()),
            Self::Json(JsonValue::Array(items)) => {
                Some(items.iter().map(SourceRef::Json).collect())
            }
            _ => None,
        }
    }

    fn is_map(self) -> bool {
        matches!(
            self,
            Self::Native(RawValue::Map(_)) | Self::Json(JsonValue::Object(_))
        )
    }

    fn field(self, name: &str) -> Option<SourceRef<'a>> {
        match self {
            Self::Native(RawValue::Map(fields)) => fields.get(name).map(SourceRef::of),
            Self::Json(JsonValue::Object(fields)) => fields.get(name).map(SourceRef::Json),
            _ => None,
        }
    }
}

impl TypeSchema {
    /// Validates and coerces `source` into this schema's canonical form.
    ///
    /// Never mutates the schema or the source; the returned value owns
    /// freshly built containers.
    pub fn extract_value(&self, source: &RawValue) -> Result<PinValue, ExtractError> {
        self.extract(SourceRef::of(source))
    }

    fn extract(&self, src: SourceRef<'_>) -> Result<PinValue, ExtractError> {
        if src.is_null() {
            return Err(ExtractError::NullValue);
        }
        match self {
            Self::Discrete { range } => extract_discrete(*range, src),
            Self::Continuous { range } => extract_continuous(*range, src),
            Self::Array { element, dimension } => extract_array(element, *dimension, src),
            Self::Structured { fields } => extract_structured(fields, src),
        }
    }
}

fn extract_discrete(range: Option<IntRange>, src: SourceRef<'_>) -> Result<PinValue, ExtractError> {
    let value = src.as_int().ok_or_else(|| ExtractError::WrongShape {
        expected: "integer".to_string(),
        got: src.kind().to_string(),
    })?;
    if let Some(range) = range {
        if !range.is_valid() {
            return Err(ExtractError::InvalidSchema(format!(
                "discrete range with non-positive size {}",
                range.size
            )));
        }
        if !range.contains(value) {
            return Err(ExtractError::OutOfRange(format!(
                "{} not in [{}, {})",
                value, range.start, range.end()
            )));
        }
    }
    Ok(PinValue::Discrete(value))
}

fn extract_continuous(
    range: Option<FloatRange>,
    src: SourceRef<'_>,
) -> Result<PinValue, ExtractError> {
    let value = src.as_float().ok_or_else(|| ExtractError::WrongShape {
        expected: "number".to_string(),
        got: src.kind().to_string(),
    })?;
    if let Some(range) = range {
        if !range.is_valid() {
            return Err(ExtractError::InvalidSchema(format!(
                "continuous range with non-positive size {}",
                range.size
            )));
        }
        if !range.contains(value) {
            return Err(ExtractError::OutOfRange(format!(
                "{} not in [{}, {})",
                value, range.start, range.end()
            )));
        }
    }
    Ok(PinValue::Continuous(value))
}

fn extract_array(
    element: &TypeSchema,
    dimension: usize,
    src: SourceRef<'_>,
) -> Result<PinValue, ExtractError> {
    if dimension < 1 {
        return Err(ExtractError::InvalidSchema(
            "array type with zero dimension".to_string(),
        ));
    }
    let items = src.elements().ok_or_else(|| ExtractError::WrongShape {
        expected: format!("sequence of length {}", dimension),
        got: src.kind().to_string(),
    })?;
    if items.len() != dimension {
        return Err(ExtractError::WrongShape {
            expected: format!("sequence of length {}", dimension),
            got: format!("sequence of length {}", items.len()),
        });
    }
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let value = element
            .extract(item)
            .map_err(|cause| ExtractError::InvalidElement {
                index,
                cause: Box::new(cause),
            })?;
        out.push(value);
    }
    Ok(PinValue::Array(out))
}

fn extract_structured(
    fields: &BTreeMap<String, TypeSchema>,
    src: SourceRef<'_>,
) -> Result<PinValue, ExtractError> {
    if fields.is_empty() {
        return Err(ExtractError::InvalidSchema(
            "structured type with no fields".to_string(),
        ));
    }
    if !src.is_map() {
        return Err(ExtractError::WrongShape {
            expected: "object".to_string(),
            got: src.kind().to_string(),
        });
    }
    // Keys in the source but not in the schema are ignored.
    let mut out = BTreeMap::new();
    for (name, field_schema) in fields {
        let field_src = src
            .field(name)
            .ok_or_else(|| ExtractError::MissingField(name.clone()))?;
        let value = field_schema
            .extract(field_src)
            .map_err(|cause| ExtractError::InvalidField {
                field: name.clone(),
                cause: Box::new(cause),
            })?;
        out.insert(name.clone(), value);
    }
    Ok(PinValue::Structured(out))
}
