// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Proptest strategies shared with other crates' tests.

use proptest::prelude::*;

use crate::{InstanceId, PropertyValue, Rect};

/// Strings covering empty, ASCII and non-ASCII text.
pub fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9_.]{1,12}",
        Just("grüße ✓ 日本語".to_string()),
        "\\PC{0,8}",
    ]
}

pub fn arb_instance_id() -> impl Strategy<Value = InstanceId> {
    (-1i32..10_000).prop_map(InstanceId)
}

/// Doubles including both infinities. NaN is left out: it never compares
/// equal to itself.
pub fn arb_double() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -1.0e6f64..1.0e6,
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

pub fn arb_rect() -> impl Strategy<Value = Rect> {
    (arb_double(), arb_double(), arb_double(), arb_double())
        .prop_map(|(x, y, width, height)| Rect { x, y, width, height })
}

pub fn arb_property_value() -> impl Strategy<Value = PropertyValue> {
    prop_oneof![
        Just(PropertyValue::Invalid),
        any::<bool>().prop_map(PropertyValue::Bool),
        any::<i64>().prop_map(PropertyValue::Int),
        arb_double().prop_map(PropertyValue::Double),
        arb_text().prop_map(PropertyValue::String),
        arb_text().prop_map(PropertyValue::Url),
        any::<(u8, u8, u8, u8)>().prop_map(|(r, g, b, a)| PropertyValue::Color { r, g, b, a }),
        (arb_double(), arb_double()).prop_map(|(x, y)| PropertyValue::Point { x, y }),
        (arb_double(), arb_double())
            .prop_map(|(width, height)| PropertyValue::Size { width, height }),
        arb_rect().prop_map(PropertyValue::Rect),
    ]
}
