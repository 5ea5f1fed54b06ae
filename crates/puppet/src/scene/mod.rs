// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Headless scene model.
//!
//! Keeps the instance tree and flat property maps the IDE describes, and
//! tracks what changed so the reporter can tell the IDE. No rendering: preview
//! requests only reserve an image segment.

use indexmap::IndexMap;
use ni_core::{InstanceId, PropertyValue, Rect};
use ni_wire::{
    ChangeAuxiliaryCommand, ChangeBindingsCommand, ChangeFileUrlCommand, ChangeIdsCommand,
    ChangeLanguageCommand, ChangeNodeSourceCommand, ChangePreviewImageSizeCommand,
    ChangeSelectionCommand, ChangeStateCommand, ChangeValuesCommand, ClearSceneCommand,
    CompleteComponentCommand, CreateInstancesCommand, CreateSceneCommand, InformationContainer,
    InformationName, InstanceContainer, PropertyValueContainer, RemoveInstancesCommand,
    RemovePropertiesCommand, ReparentContainer, ReparentInstancesCommand,
    RequestModelNodePreviewImageCommand,
};
use tracing::{debug, info, warn};

use crate::collaborator::NodeInstanceServer;
use crate::reporter::{DirtyFlags, NodeState, Scene};
use crate::shared_memory::{SegmentKind, SegmentRegistry, SharedMemoryHooks};

const GEOMETRY_PROPERTIES: [&str; 4] = ["x", "y", "width", "height"];
const TRANSFORM_PROPERTIES: [&str; 4] = ["z", "rotation", "scale", "transformOrigin"];

#[derive(Debug, Clone, Default)]
struct Node {
    type_name: String,
    id: String,
    parent: Option<InstanceId>,
    parent_property: String,
    values: IndexMap<String, PropertyValue>,
    bindings: IndexMap<String, String>,
    auxiliary: IndexMap<String, PropertyValue>,
    node_source: String,
    dirty: DirtyFlags,
}

impl Node {
    fn number(&self, name: &str) -> f64 {
        self.values.get(name).and_then(PropertyValue::as_f64).unwrap_or(0.0)
    }
}

#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: IndexMap<InstanceId, Node>,
    root: Option<InstanceId>,
    changed: Vec<(InstanceId, String)>,
    completed: Vec<InstanceId>,
    root_rect_changed: bool,
    scene_rect: Rect,
    file_url: String,
    language: String,
    state: Option<InstanceId>,
    selection: Vec<InstanceId>,
    preview_size: (u32, u32),
    segments: SegmentRegistry,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<InstanceId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn value(&self, instance: InstanceId, name: &str) -> Option<&PropertyValue> {
        self.nodes.get(&instance)?.values.get(name)
    }

    pub fn binding(&self, instance: InstanceId, name: &str) -> Option<&str> {
        self.nodes.get(&instance)?.bindings.get(name).map(String::as_str)
    }

    pub fn auxiliary(&self, instance: InstanceId, name: &str) -> Option<&PropertyValue> {
        self.nodes.get(&instance)?.auxiliary.get(name)
    }

    pub fn id_of(&self, instance: InstanceId) -> Option<&str> {
        self.nodes.get(&instance).map(|node| node.id.as_str())
    }

    pub fn type_of(&self, instance: InstanceId) -> Option<&str> {
        self.nodes.get(&instance).map(|node| node.type_name.as_str())
    }

    pub fn node_source(&self, instance: InstanceId) -> Option<&str> {
        self.nodes.get(&instance).map(|node| node.node_source.as_str())
    }

    pub fn scene_rect(&self) -> Rect {
        self.scene_rect
    }

    pub fn file_url(&self) -> &str {
        &self.file_url
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn state(&self) -> Option<InstanceId> {
        self.state
    }

    pub fn selection(&self) -> &[InstanceId] {
        &self.selection
    }

    pub fn preview_size(&self) -> (u32, u32) {
        self.preview_size
    }

    pub fn segments(&self) -> &SegmentRegistry {
        &self.segments
    }

    fn add_instance(&mut self, container: InstanceContainer) {
        let node = Node {
            type_name: container.type_name,
            node_source: container.node_source,
            dirty: DirtyFlags { content: true, ..Default::default() },
            ..Default::default()
        };
        if self.nodes.insert(container.instance_id, node).is_some() {
            warn!(instance = %container.instance_id, "instance created twice, replacing");
        }
        if self.root.is_none() {
            self.root = Some(container.instance_id);
        }
    }

    fn reparent(&mut self, container: ReparentContainer) {
        let Some(node) = self.nodes.get_mut(&container.instance_id) else {
            debug!(instance = %container.instance_id, "reparent of unknown instance");
            return;
        };
        node.parent = container.new_parent_instance_id.filter(|parent| parent.is_valid());
        node.parent_property = container.new_parent_property;
        node.dirty.transform = true;
        self.changed.push((container.instance_id, "parent".to_string()));
    }

    fn set_value(&mut self, change: PropertyValueContainer) {
        let Some(node) = self.nodes.get_mut(&change.instance_id) else {
            debug!(instance = %change.instance_id, property = %change.name, "value for unknown instance");
            return;
        };
        let name = change.name;
        if GEOMETRY_PROPERTIES.contains(&name.as_str()) {
            node.dirty.geometry = true;
            if Some(change.instance_id) == self.root && (name == "width" || name == "height") {
                self.root_rect_changed = true;
            }
        } else if TRANSFORM_PROPERTIES.contains(&name.as_str()) {
            node.dirty.transform = true;
        }
        node.bindings.shift_remove(&name);
        node.values.insert(name.clone(), change.value);
        self.changed.push((change.instance_id, name));
    }

    fn reset_scene(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.changed.clear();
        self.completed.clear();
        self.root_rect_changed = false;
        self.state = None;
        self.selection.clear();
    }
}

impl SharedMemoryHooks for SceneGraph {
    fn release_values(&mut self, keys: &[i32]) {
        let released = self.segments.release(SegmentKind::Values, keys);
        debug!(released, requested = keys.len(), "released values segments");
    }

    fn release_images(&mut self, keys: &[i32]) {
        let released = self.segments.release(SegmentKind::Image, keys);
        debug!(released, requested = keys.len(), "released image segments");
    }
}

impl NodeInstanceServer for SceneGraph {
    fn create_instances(&mut self, command: CreateInstancesCommand) {
        for container in command.instances {
            self.add_instance(container);
        }
    }

    fn change_file_url(&mut self, command: ChangeFileUrlCommand) {
        self.file_url = command.file_url;
    }

    fn create_scene(&mut self, command: CreateSceneCommand) {
        self.reset_scene();
        self.file_url = command.file_url;
        self.language = command.language;

        let created: Vec<InstanceId> = command.instances.iter().map(|i| i.instance_id).collect();
        for container in command.instances {
            self.add_instance(container);
        }
        for container in command.reparent_instances {
            self.reparent(container);
        }
        for container in command.ids {
            if let Some(node) = self.nodes.get_mut(&container.instance_id) {
                node.id = container.id;
            }
        }
        for change in command.value_changes {
            self.set_value(change);
        }
        self.change_property_bindings(ChangeBindingsCommand {
            binding_changes: command.binding_changes,
        });
        self.change_auxiliary_values(ChangeAuxiliaryCommand {
            auxiliary_changes: command.auxiliary_changes,
        });
        self.completed.extend(created);
        info!(
            instances = self.nodes.len(),
            imports = command.imports.len(),
            mock_types = command.mock_types.len(),
            file_url = %self.file_url,
            "scene created"
        );
    }

    fn clear_scene(&mut self, _command: ClearSceneCommand) {
        self.reset_scene();
        self.file_url.clear();
    }

    fn remove_instances(&mut self, command: RemoveInstancesCommand) {
        for instance in &command.instance_ids {
            self.nodes.shift_remove(instance);
            if self.root == Some(*instance) {
                self.root = None;
            }
        }
        for node in self.nodes.values_mut() {
            if node.parent.is_some_and(|parent| command.instance_ids.contains(&parent)) {
                node.parent = None;
                node.parent_property.clear();
            }
        }
        self.completed.retain(|id| !command.instance_ids.contains(id));
    }

    fn remove_properties(&mut self, command: RemovePropertiesCommand) {
        for property in command.properties {
            if let Some(node) = self.nodes.get_mut(&property.instance_id) {
                node.values.shift_remove(&property.name);
                node.bindings.shift_remove(&property.name);
                self.changed.push((property.instance_id, property.name));
            }
        }
    }

    fn change_property_bindings(&mut self, command: ChangeBindingsCommand) {
        for binding in command.binding_changes {
            if let Some(node) = self.nodes.get_mut(&binding.instance_id) {
                if binding.name.contains("anchors") {
                    node.dirty.geometry = true;
                }
                node.bindings.insert(binding.name.clone(), binding.expression);
                self.changed.push((binding.instance_id, binding.name));
            }
        }
    }

    fn change_property_values(&mut self, command: ChangeValuesCommand) {
        for change in command.value_changes {
            self.set_value(change);
        }
    }

    fn change_auxiliary_values(&mut self, command: ChangeAuxiliaryCommand) {
        for change in command.auxiliary_changes {
            if let Some(node) = self.nodes.get_mut(&change.instance_id) {
                node.auxiliary.insert(change.name, change.value);
            }
        }
    }

    fn reparent_instances(&mut self, command: ReparentInstancesCommand) {
        for container in command.reparent_instances {
            self.reparent(container);
        }
    }

    fn change_ids(&mut self, command: ChangeIdsCommand) {
        for container in command.ids {
            if let Some(node) = self.nodes.get_mut(&container.instance_id) {
                node.id = container.id;
            }
        }
    }

    fn change_state(&mut self, command: ChangeStateCommand) {
        self.state = command.state_instance_id.is_valid().then_some(command.state_instance_id);
    }

    fn complete_component(&mut self, command: CompleteComponentCommand) {
        let known = command.instances.into_iter().filter(|id| self.nodes.contains_key(id));
        self.completed.extend(known);
    }

    fn change_node_source(&mut self, command: ChangeNodeSourceCommand) {
        if let Some(node) = self.nodes.get_mut(&command.instance_id) {
            node.node_source = command.node_source;
            node.dirty.content = true;
        }
    }

    fn change_selection(&mut self, command: ChangeSelectionCommand) {
        self.selection = command.instance_ids;
    }

    fn request_model_node_preview_image(&mut self, command: RequestModelNodePreviewImageCommand) {
        let key = self.segments.register(SegmentKind::Image);
        debug!(instance = %command.instance_id, key, "reserved preview image segment");
    }

    fn change_language(&mut self, command: ChangeLanguageCommand) {
        self.language = command.language;
    }

    fn change_preview_image_size(&mut self, command: ChangePreviewImageSizeCommand) {
        self.preview_size = (command.width, command.height);
    }
}

impl Scene for SceneGraph {
    fn has_live_root(&self) -> bool {
        self.root.is_some_and(|root| self.nodes.contains_key(&root))
    }

    fn nodes(&self) -> Vec<NodeState> {
        self.nodes
            .iter()
            .map(|(id, node)| NodeState { instance_id: *id, dirty: node.dirty })
            .collect()
    }

    fn is_valid(&self, instance: InstanceId) -> bool {
        self.nodes.contains_key(&instance)
    }

    fn take_changed_properties(&mut self) -> Vec<(InstanceId, String)> {
        std::mem::take(&mut self.changed)
    }

    fn reset_dirty(&mut self) {
        for node in self.nodes.values_mut() {
            node.dirty = DirtyFlags::default();
        }
    }

    fn parent_of(&self, instance: InstanceId) -> Option<InstanceId> {
        self.nodes.get(&instance)?.parent
    }

    fn children_of(&self, parent: InstanceId) -> Vec<InstanceId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent == Some(parent))
            .map(|(id, _)| *id)
            .collect()
    }

    fn information_for(&self, instances: &[InstanceId]) -> Vec<InformationContainer> {
        let mut informations = Vec::new();
        for instance in instances {
            let Some(node) = self.nodes.get(instance) else {
                continue;
            };
            let position = PropertyValue::Point { x: node.number("x"), y: node.number("y") };
            let size =
                PropertyValue::Size { width: node.number("width"), height: node.number("height") };
            let parent = match node.parent {
                Some(parent) => PropertyValue::Int(i64::from(parent.get())),
                None => PropertyValue::Invalid,
            };
            informations.push(InformationContainer::new(*instance, InformationName::Position, position));
            informations.push(InformationContainer::new(*instance, InformationName::Size, size));
            informations.push(
                InformationContainer::new(*instance, InformationName::ParentInstanceId, parent)
                    .with_second(PropertyValue::String(node.parent_property.clone())),
            );
            let anchored = node.bindings.keys().any(|name| name.contains("anchors"));
            informations.push(InformationContainer::new(
                *instance,
                InformationName::HasAnchor,
                PropertyValue::Bool(anchored),
            ));
        }
        informations
    }

    fn values_for(&self, changes: &[(InstanceId, String)]) -> Vec<PropertyValueContainer> {
        changes
            .iter()
            .filter_map(|(instance, name)| {
                let node = self.nodes.get(instance)?;
                let value = if name == "parent" {
                    node.parent
                        .map(|parent| PropertyValue::Int(i64::from(parent.get())))
                        .unwrap_or_default()
                } else {
                    node.values.get(name).cloned().unwrap_or_default()
                };
                Some(PropertyValueContainer::new(*instance, name.clone(), value))
            })
            .collect()
    }

    fn take_root_rect_change(&mut self) -> Option<Rect> {
        if !std::mem::take(&mut self.root_rect_changed) {
            return None;
        }
        let root = self.nodes.get(&self.root?)?;
        Some(Rect::new(0.0, 0.0, root.number("width"), root.number("height")))
    }

    fn set_scene_rect(&mut self, rect: Rect) {
        self.scene_rect = rect;
    }

    fn take_completed_components(&mut self) -> Vec<InstanceId> {
        std::mem::take(&mut self.completed)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
