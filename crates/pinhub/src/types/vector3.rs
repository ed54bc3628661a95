// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! 3-dimensional vector values.

use crate::schema::{ExtractError, PinValue, RawValue};
use std::ops::{Add, Mul, Sub};

/// 3-dimensional vector, the native counterpart of the `v3` pin schema.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Vector3 = Vector3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    pub const RIGHT: Vector3 = Vector3 {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    pub const LEFT: Vector3 = Vector3 {
        x: -1.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UP: Vector3 = Vector3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    pub const DOWN: Vector3 = Vector3 {
        x: 0.0,
        y: -1.0,
        z: 0.0,
    };
    pub const FORWARD: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };
    pub const BACK: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: -1.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn sqr_magnitude(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn magnitude(self) -> f64 {
        self.sqr_magnitude().sqrt()
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, scalar: f64) -> Vector3 {
        Vector3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl From<Vector3> for PinValue {
    fn from(v: Vector3) -> Self {
        PinValue::Array(vec![
            PinValue::Continuous(v.x),
            PinValue::Continuous(v.y),
            PinValue::Continuous(v.z),
        ])
    }
}

impl From<Vector3> for RawValue {
    fn from(v: Vector3) -> Self {
        RawValue::Seq(vec![
            RawValue::Float(v.x),
            RawValue::Float(v.y),
            RawValue::Float(v.z),
        ])
    }
}

impl TryFrom<&PinValue> for Vector3 {
    type Error = ExtractError;

    fn try_from(value: &PinValue) -> Result<Self, ExtractError> {
        let wrong_shape = || ExtractError::WrongShape {
            expected: "sequence of 3 continuous values".to_string(),
            got: format!("{:?}", value),
        };
        match value {
            PinValue::Array(items) if items.len() == 3 => Ok(Vector3::new(
                items[0].as_f64().ok_or_else(wrong_shape)?,
                items[1].as_f64().ok_or_else(wrong_shape)?,
                items[2].as_f64().ok_or_else(wrong_shape)?,
            )),
            _ => Err(wrong_shape()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeSchema;

    #[test]
    fn test_arithmetic() {
        let v = Vector3::new(1.0, 2.0, 3.0) + Vector3::new(0.0, -2.0, 1.0);
        assert_eq!(v, Vector3::new(1.0, 0.0, 4.0));
        assert_eq!(v - Vector3::ONE, Vector3::new(0.0, -1.0, 3.0));
        assert_eq!(Vector3::FORWARD * -1.0, Vector3::BACK);
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(Vector3::new(2.0, 3.0, 6.0).magnitude(), 7.0);
        assert_eq!(Vector3::ZERO.sqr_magnitude(), 0.0);
        assert_eq!(Vector3::ONE.sqr_magnitude(), 3.0);
    }

    #[test]
    fn test_schema_round_trip() {
        let v = Vector3::new(0.5, -0.25, 1.5);
        let extracted = TypeSchema::v3().extract_value(&v.into()).unwrap();
        assert_eq!(Vector3::try_from(&extracted).unwrap(), v);
    }

    #[test]
    fn test_rejects_wrong_shapes() {
        assert!(Vector3::try_from(&PinValue::Continuous(1.0)).is_err());
        assert!(Vector3::try_from(&PinValue::Array(vec![
            PinValue::Continuous(1.0),
            PinValue::Continuous(2.0)
        ]))
        .is_err());
    }
}
