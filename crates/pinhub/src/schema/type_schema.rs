// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Self-describing type descriptors for pin values.
//!
//! A [`TypeSchema`] declares the shape of values a pin accepts: a discrete or
//! continuous scalar with an optional half-open range, a fixed-size array of
//! a uniform element type, or a named-field structure. Schemas are recursive
//! and validate themselves via [`TypeSchema::is_valid`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// Base type tags, as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BaseType {
    Discrete,
    Continuous,
    Array,
    Structured,
}

/// Integral range constraint, half-open: `start <= v < start + size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRange {
    pub start: i64,
    pub size: i64,
}

impl IntRange {
    pub fn new(start: i64, size: i64) -> Self {
        Self { start, size }
    }

    /// A range is well-formed only with a strictly positive size.
    pub fn is_valid(&self) -> bool {
        self.size > 0
    }

    pub fn contains(&self, value: i64) -> bool {
        // i128 avoids overflow at the extremes of i64.
        let v = i128::from(value);
        v >= i128::from(self.start) && v < i128::from(self.start) + i128::from(self.size)
    }

    /// Exclusive upper bound, saturating at `i64::MAX`.
    pub fn end(&self) -> i64 {
        self.start.saturating_add(self.size)
    }
}

/// Floating-point range constraint, half-open: `start <= v < start + size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatRange {
    pub start: f64,
    pub size: f64,
}

impl FloatRange {
    pub fn new(start: f64, size: f64) -> Self {
        Self { start, size }
    }

    /// A range is well-formed only with a strictly positive size.
    pub fn is_valid(&self) -> bool {
        self.size > 0.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value < self.start + self.size
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> f64 {
        self.start + self.size
    }
}

impl Hash for FloatRange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.start.to_bits());
        state.write_u64(self.size.to_bits());
    }
}

/// Recursive descriptor of an accepted value shape.
///
/// Each variant carries exactly the fields relevant to it, so combinations
/// like a dimension on a scalar type are unrepresentable. Equality and
/// hashing are structural: two schemas are equal iff built from identical
/// descriptors, regardless of construction path.
#[derive(Debug, Clone, PartialEq, Hash)]
pub enum TypeSchema {
    /// Integral scalar, optionally constrained to a half-open range.
    Discrete { range: Option<IntRange> },
    /// Floating-point scalar, optionally constrained to a half-open range.
    Continuous { range: Option<FloatRange> },
    /// Fixed-length homogeneous sequence.
    Array {
        element: Box<TypeSchema>,
        dimension: usize,
    },
    /// Named-field structure; must be non-empty to be valid.
    Structured { fields: BTreeMap<String, TypeSchema> },
}

impl TypeSchema {
    /// Unconstrained integral scalar.
    pub fn discrete() -> Self {
        Self::Discrete { range: None }
    }

    /// Integral scalar accepting `start <= v < start + size`.
    pub fn discrete_range(start: i64, size: i64) -> Self {
        Self::Discrete {
            range: Some(IntRange::new(start, size)),
        }
    }

    /// Unconstrained floating-point scalar.
    pub fn continuous() -> Self {
        Self::Continuous { range: None }
    }

    /// Floating-point scalar accepting `start <= v < start + size`.
    pub fn continuous_range(start: f64, size: f64) -> Self {
        Self::Continuous {
            range: Some(FloatRange::new(start, size)),
        }
    }

    /// Fixed-size array of `dimension` elements of a uniform type.
    pub fn array(element: TypeSchema, dimension: usize) -> Self {
        Self::Array {
            element: Box::new(element),
            dimension,
        }
    }

    /// Named-field structure.
    pub fn structured<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, TypeSchema)>,
        S: Into<String>,
    {
        Self::Structured {
            fields: fields
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        }
    }

    /// Boolean-like 0/1 scalar: `Discrete[0, 2)`.
    pub fn bit() -> &'static TypeSchema {
        static BIT: OnceLock<TypeSchema> = OnceLock::new();
        BIT.get_or_init(|| TypeSchema::discrete_range(0, 2))
    }

    /// Normalized scalar: `Continuous[-1.0, 1.0)`.
    pub fn uniform() -> &'static TypeSchema {
        static UNIFORM: OnceLock<TypeSchema> = OnceLock::new();
        UNIFORM.get_or_init(|| TypeSchema::continuous_range(-1.0, 2.0))
    }

    /// 2-component vector of unconstrained continuous scalars.
    pub fn v2() -> &'static TypeSchema {
        static V2: OnceLock<TypeSchema> = OnceLock::new();
        V2.get_or_init(|| TypeSchema::array(TypeSchema::continuous(), 2))
    }

    /// 3-component vector of unconstrained continuous scalars.
    pub fn v3() -> &'static TypeSchema {
        static V3: OnceLock<TypeSchema> = OnceLock::new();
        V3.get_or_init(|| TypeSchema::array(TypeSchema::continuous(), 3))
    }

    /// Wire-level tag for this schema.
    pub fn base_type(&self) -> BaseType {
        match self {
            Self::Discrete { .. } => BaseType::Discrete,
            Self::Continuous { .. } => BaseType::Continuous,
            Self::Array { .. } => BaseType::Array,
            Self::Structured { .. } => BaseType::Structured,
        }
    }

    /// Structural validity check.
    ///
    /// Scalars are valid with or without a range, but a present range must
    /// have strictly positive size. Arrays need a dimension of at least 1
    /// and a valid element type. Structures need at least one field, every
    /// field name non-empty and every field schema valid.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Discrete { range } => range.map_or(true, |r| r.is_valid()),
            Self::Continuous { range } => range.map_or(true, |r| r.is_valid()),
            Self::Array { element, dimension } => *dimension >= 1 && element.is_valid(),
            Self::Structured { fields } => {
                !fields.is_empty()
                    && fields
                        .iter()
                        .all(|(name, schema)| !name.is_empty() && schema.is_valid())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(schema: &TypeSchema) -> u64 {
        let mut hasher = DefaultHasher::new();
        schema.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_well_known_types() {
        assert_eq!(*TypeSchema::bit(), TypeSchema::discrete_range(0, 2));
        assert_eq!(
            *TypeSchema::uniform(),
            TypeSchema::continuous_range(-1.0, 2.0)
        );
        assert_eq!(
            *TypeSchema::v2(),
            TypeSchema::array(TypeSchema::continuous(), 2)
        );
        assert_eq!(
            *TypeSchema::v3(),
            TypeSchema::array(TypeSchema::continuous(), 3)
        );
        assert!(TypeSchema::bit().is_valid());
        assert!(TypeSchema::uniform().is_valid());
        assert!(TypeSchema::v2().is_valid());
        assert!(TypeSchema::v3().is_valid());
    }

    #[test]
    fn test_scalar_validity() {
        assert!(TypeSchema::discrete().is_valid());
        assert!(TypeSchema::discrete_range(0, 1).is_valid());
        assert!(!TypeSchema::discrete_range(0, 0).is_valid());
        assert!(!TypeSchema::discrete_range(0, -1).is_valid());

        assert!(TypeSchema::continuous().is_valid());
        assert!(TypeSchema::continuous_range(0.0, 1.0).is_valid());
        assert!(!TypeSchema::continuous_range(0.0, 0.0).is_valid());
        assert!(!TypeSchema::continuous_range(0.0, -1.0).is_valid());
    }

    #[test]
    fn test_array_validity() {
        assert!(TypeSchema::array(TypeSchema::discrete_range(0, 1), 1).is_valid());
        assert!(!TypeSchema::array(TypeSchema::discrete_range(0, 1), 0).is_valid());
        // Invalid element type poisons the array regardless of dimension.
        assert!(!TypeSchema::array(TypeSchema::discrete_range(0, -1), 1).is_valid());
        assert!(!TypeSchema::array(TypeSchema::discrete_range(0, -1), 0).is_valid());
    }

    #[test]
    fn test_structured_validity() {
        let empty: [(&str, TypeSchema); 0] = [];
        assert!(!TypeSchema::structured(empty).is_valid());
        assert!(!TypeSchema::structured([("", TypeSchema::discrete())]).is_valid());
        assert!(!TypeSchema::structured([("field", TypeSchema::discrete_range(0, -1))]).is_valid());
        assert!(TypeSchema::structured([("field", TypeSchema::discrete_range(0, 1))]).is_valid());
    }

    #[test]
    fn test_structural_equality_and_hash() {
        let a = TypeSchema::structured([
            ("bit", TypeSchema::bit().clone()),
            ("pos", TypeSchema::v3().clone()),
        ]);
        let b = TypeSchema::structured([
            ("pos", TypeSchema::array(TypeSchema::continuous(), 3)),
            ("bit", TypeSchema::discrete_range(0, 2)),
        ]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        assert_ne!(TypeSchema::discrete(), TypeSchema::continuous());
        assert_ne!(
            TypeSchema::discrete_range(0, 1),
            TypeSchema::discrete_range(0, 2)
        );
    }

    #[test]
    fn test_range_bounds() {
        let range = IntRange::new(-2, 4);
        assert!(range.contains(-2));
        assert!(range.contains(1));
        assert!(!range.contains(2));
        assert!(!range.contains(-3));

        let range = FloatRange::new(-1.0, 2.0);
        assert!(range.contains(-1.0));
        assert!(range.contains(0.999));
        assert!(!range.contains(1.0));

        // Extremes must not overflow.
        let wide = IntRange::new(i64::MIN, i64::MAX);
        assert!(wide.contains(i64::MIN));
        assert!(wide.contains(-2));
        assert!(!wide.contains(-1));
    }
}
