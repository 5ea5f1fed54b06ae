// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flat dynamic property values carried inside command payloads.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    #[serde(with = "float")]
    pub x: f64,
    #[serde(with = "float")]
    pub y: f64,
    #[serde(with = "float")]
    pub width: f64,
    #[serde(with = "float")]
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// A rect is valid when it encloses a non-empty area.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// A single property value.
///
/// Values never nest: anything richer than these variants is carried as a
/// string (bindings) or moved into a shared-memory segment by the sender.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum PropertyValue {
    #[default]
    Invalid,
    Bool(bool),
    Int(i64),
    Double(#[serde(with = "float")] f64),
    String(String),
    Url(String),
    Color { r: u8, g: u8, b: u8, a: u8 },
    Point {
        #[serde(with = "float")]
        x: f64,
        #[serde(with = "float")]
        y: f64,
    },
    Size {
        #[serde(with = "float")]
        width: f64,
        #[serde(with = "float")]
        height: f64,
    },
    Rect(Rect),
}

impl PropertyValue {
    pub fn is_valid(&self) -> bool {
        !matches!(self, PropertyValue::Invalid)
    }

    /// Numeric view used for geometry properties.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Int(i) => Some(*i as f64),
            PropertyValue::Double(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Double(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

/// Serde adapter for `f64` fields that must survive non-finite values.
///
/// JSON has no infinity or NaN, and `serde_json` writes them as `null`, which
/// no `f64` field accepts. Finite values stay plain numbers; the others are
/// written as the strings `"inf"`, `"-inf"` and `"NaN"`.
pub mod float {
    use std::fmt;

    use serde::de::{self, Unexpected, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(FloatVisitor)
    }

    struct FloatVisitor;

    impl Visitor<'_> for FloatVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or one of \"inf\", \"-inf\", \"NaN\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            match v {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                other => Err(E::invalid_value(Unexpected::Str(other), &self)),
            }
        }
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
