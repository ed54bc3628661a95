// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursive, self-describing type schemas and value extraction.
//!
//! This module is the validation core of the pin protocol:
//!
//! - **[`TypeSchema`]**: declarative descriptor of an accepted value shape
//!   (scalar with optional range, fixed-size array, named-field structure)
//! - **[`RawValue`]**: closed variant over the source representations a peer
//!   may supply (native scalars/collections or JSON tree nodes)
//! - **[`PinValue`]**: canonical value produced by successful extraction
//! - **Wire bridge**: fixed-field JSON representation for schemas
//!
//! # Example
//!
//! ```rust
//! use pinhub::schema::{PinValue, RawValue, TypeSchema};
//!
//! let schema = TypeSchema::structured([
//!     ("on", TypeSchema::bit().clone()),
//!     ("level", TypeSchema::continuous_range(0.0, 1.0)),
//! ]);
//! assert!(schema.is_valid());
//!
//! let payload: RawValue = serde_json::json!({"on": 1, "level": 0.25}).into();
//! let value = schema.extract_value(&payload).unwrap();
//! assert_eq!(value.field("level").and_then(PinValue::as_f64), Some(0.25));
//! ```

mod extract;
mod type_schema;
mod value;
mod wire;

pub use extract::ExtractError;
pub use type_schema::{BaseType, FloatRange, IntRange, TypeSchema};
pub use value::{PinValue, RawValue};
pub use wire::{
    BASE_TYPE_KEY, CONTINUOUS_RANGE_SIZE_KEY, CONTINUOUS_RANGE_START_KEY, DIMENSION_KEY,
    DISCRETE_RANGE_SIZE_KEY, DISCRETE_RANGE_START_KEY, ELEMENT_TYPE_KEY, FIELDS_KEY,
};
