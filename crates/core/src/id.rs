// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Instance identity shared by both processes

use serde::{Deserialize, Serialize};

/// Numeric identity of a scene node instance.
///
/// Assigned by the IDE when it creates an instance and echoed back by the
/// puppet in every report about that instance. Negative values never name a
/// live instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub i32);

impl InstanceId {
    /// The root instance of a scene.
    pub const ROOT: InstanceId = InstanceId(0);

    /// Placeholder for "no instance" in positions that cannot be optional.
    pub const INVALID: InstanceId = InstanceId(-1);

    pub fn is_valid(self) -> bool {
        self.0 >= 0
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i32> for InstanceId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
