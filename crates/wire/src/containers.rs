// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Payload records embedded in commands.
//!
//! Every container is a flat record of primitives; lists of containers are the
//! deepest nesting a command payload ever reaches.

use ni_core::{InstanceId, PropertyValue, Rect};
use serde::{Deserialize, Serialize};

/// How the source of a node is interpreted when instantiating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeSourceKind {
    #[default]
    NoSource,
    CustomParserSource,
    ComponentSource,
}

/// Whether an instance is a plain object or a visual item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeMetaType {
    #[default]
    ObjectMetaType,
    ItemMetaType,
}

/// Everything needed to instantiate one node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstanceContainer {
    pub instance_id: InstanceId,
    pub type_name: String,
    pub major_number: i32,
    pub minor_number: i32,
    pub component_path: String,
    pub node_source: String,
    pub node_source_kind: NodeSourceKind,
    pub meta_type: NodeMetaType,
}

/// Move an instance from one parent property to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReparentContainer {
    pub instance_id: InstanceId,
    pub old_parent_instance_id: Option<InstanceId>,
    pub old_parent_property: String,
    pub new_parent_instance_id: Option<InstanceId>,
    pub new_parent_property: String,
}

/// Assigns a QML id to an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdContainer {
    pub instance_id: InstanceId,
    pub type_name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValueContainer {
    pub instance_id: InstanceId,
    pub name: String,
    pub value: PropertyValue,
    /// Non-empty when the property is created dynamically with this type.
    pub dynamic_type_name: String,
}

impl PropertyValueContainer {
    pub fn new(instance_id: InstanceId, name: impl Into<String>, value: PropertyValue) -> Self {
        Self { instance_id, name: name.into(), value, dynamic_type_name: String::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyBindingContainer {
    pub instance_id: InstanceId,
    pub name: String,
    pub expression: String,
    pub dynamic_type_name: String,
}

/// Names a property without a value, e.g. for removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAbstractContainer {
    pub instance_id: InstanceId,
    pub name: String,
    pub dynamic_type_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AddImportContainer {
    pub url: String,
    pub file_name: String,
    pub version: String,
    pub alias: String,
    pub import_paths: Vec<String>,
}

/// A type the puppet should stub instead of loading.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MockupTypeContainer {
    pub type_name: String,
    pub import_uri: String,
    pub major_version: i32,
    pub minor_version: i32,
}

/// Kind of fact reported in an [`InformationContainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InformationName {
    NoName,
    Size,
    BoundingRect,
    ContentItemBoundingRect,
    Transform,
    SceneTransform,
    Position,
    ParentInstanceId,
    HasContent,
    HasAnchor,
    IsMovable,
    IsResizable,
    IsInLayoutable,
    InstanceTypeForProperty,
    HasBindingForProperty,
}

/// One reported fact about an instance, with up to three values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationContainer {
    pub instance_id: InstanceId,
    pub name: InformationName,
    pub information: PropertyValue,
    pub second: PropertyValue,
    pub third: PropertyValue,
}

impl InformationContainer {
    pub fn new(instance_id: InstanceId, name: InformationName, information: PropertyValue) -> Self {
        Self {
            instance_id,
            name,
            information,
            second: PropertyValue::Invalid,
            third: PropertyValue::Invalid,
        }
    }

    pub fn with_second(mut self, second: PropertyValue) -> Self {
        self.second = second;
        self
    }
}

/// A rendered image living in an `Image` shared-memory segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContainer {
    pub instance_id: InstanceId,
    pub key_number: i32,
    pub width: u32,
    pub height: u32,
    pub rect: Rect,
}
