// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! 2-dimensional vector values.

use crate::schema::{ExtractError, PinValue, RawValue};
use std::ops::{Add, Mul, Sub};

/// 2-dimensional vector, the native counterpart of the `v2` pin schema.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };
    pub const ONE: Vector2 = Vector2 { x: 1.0, y: 1.0 };
    pub const RIGHT: Vector2 = Vector2 { x: 1.0, y: 0.0 };
    pub const LEFT: Vector2 = Vector2 { x: -1.0, y: 0.0 };
    pub const UP: Vector2 = Vector2 { x: 0.0, y: 1.0 };
    pub const DOWN: Vector2 = Vector2 { x: 0.0, y: -1.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn sqr_magnitude(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn magnitude(self) -> f64 {
        self.sqr_magnitude().sqrt()
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, scalar: f64) -> Vector2 {
        Vector2::new(self.x * scalar, self.y * scalar)
    }
}

impl From<Vector2> for PinValue {
    fn from(v: Vector2) -> Self {
        PinValue::Array(vec![PinValue::Continuous(v.x), PinValue::Continuous(v.y)])
    }
}

impl From<Vector2> for RawValue {
    fn from(v: Vector2) -> Self {
        RawValue::Seq(vec![RawValue::Float(v.x), RawValue::Float(v.y)])
    }
}

impl TryFrom<&PinValue> for Vector2 {
    type Error = ExtractError;

    fn try_from(value: &PinValue) -> Result<Self, ExtractError> {
        let wrong_shape = || ExtractError::WrongShape {
            expected: "sequence of 2 continuous values".to_string(),
            got: format!("{:?}", value),
        };
        match value {
            PinValue::Array(items) if items.len() == 2 => Ok(Vector2::new(
                items[0].as_f64().ok_or_else(wrong_shape)?,
                items[1].as_f64().ok_or_else(wrong_shape)?,
            )),
            _ => Err(wrong_shape()),
        }
    }
}
