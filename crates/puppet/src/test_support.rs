// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording collaborators shared by unit tests.

use ni_wire::{
    ChangeAuxiliaryCommand, ChangeBindingsCommand, ChangeFileUrlCommand, ChangeIdsCommand,
    ChangeNodeSourceCommand, ChangeStateCommand, ChangeValuesCommand, ChildrenChangedCommand,
    ClearSceneCommand, Command, CommandKind, CompleteComponentCommand, ComponentCompletedCommand,
    CreateInstancesCommand, CreateSceneCommand, DebugOutputCommand, InformationChangedCommand,
    PixmapChangedCommand, PuppetAliveCommand, RemoveInstancesCommand, RemovePropertiesCommand,
    ReparentInstancesCommand, StatePreviewImageChangedCommand, SynchronizeCommand, TokenCommand,
    ValuesChangedCommand,
};

use crate::collaborator::{NodeInstanceClient, NodeInstanceServer};
use crate::endpoint::ConnectionFault;
use crate::shared_memory::SharedMemoryHooks;

/// Server that records which operations were invoked.
#[derive(Debug, Default)]
pub struct RecordingServer {
    pub calls: Vec<CommandKind>,
    pub released_values: Vec<Vec<i32>>,
    pub released_images: Vec<Vec<i32>>,
}

impl SharedMemoryHooks for RecordingServer {
    fn release_values(&mut self, keys: &[i32]) {
        self.released_values.push(keys.to_vec());
    }

    fn release_images(&mut self, keys: &[i32]) {
        self.released_images.push(keys.to_vec());
    }
}

impl NodeInstanceServer for RecordingServer {
    fn create_instances(&mut self, _: CreateInstancesCommand) {
        self.calls.push(CommandKind::CreateInstances);
    }
    fn change_file_url(&mut self, _: ChangeFileUrlCommand) {
        self.calls.push(CommandKind::ChangeFileUrl);
    }
    fn create_scene(&mut self, _: CreateSceneCommand) {
        self.calls.push(CommandKind::CreateScene);
    }
    fn clear_scene(&mut self, _: ClearSceneCommand) {
        self.calls.push(CommandKind::ClearScene);
    }
    fn remove_instances(&mut self, _: RemoveInstancesCommand) {
        self.calls.push(CommandKind::RemoveInstances);
    }
    fn remove_properties(&mut self, _: RemovePropertiesCommand) {
        self.calls.push(CommandKind::RemoveProperties);
    }
    fn change_property_bindings(&mut self, _: ChangeBindingsCommand) {
        self.calls.push(CommandKind::ChangePropertyBindings);
    }
    fn change_property_values(&mut self, _: ChangeValuesCommand) {
        self.calls.push(CommandKind::ChangePropertyValues);
    }
    fn change_auxiliary_values(&mut self, _: ChangeAuxiliaryCommand) {
        self.calls.push(CommandKind::ChangeAuxiliaryValues);
    }
    fn reparent_instances(&mut self, _: ReparentInstancesCommand) {
        self.calls.push(CommandKind::ReparentInstances);
    }
    fn change_ids(&mut self, _: ChangeIdsCommand) {
        self.calls.push(CommandKind::ChangeIds);
    }
    fn change_state(&mut self, _: ChangeStateCommand) {
        self.calls.push(CommandKind::ChangeState);
    }
    fn complete_component(&mut self, _: CompleteComponentCommand) {
        self.calls.push(CommandKind::CompleteComponent);
    }
    fn change_node_source(&mut self, _: ChangeNodeSourceCommand) {
        self.calls.push(CommandKind::ChangeNodeSource);
    }
}

/// Client that records every command it is handed, in order.
#[derive(Debug, Default)]
pub struct RecordingClient {
    pub sent: Vec<Command>,
    pub flushes: usize,
    /// Reported by `bytes_to_write`.
    pub backlog: usize,
}

impl RecordingClient {
    pub fn kinds(&self) -> Vec<CommandKind> {
        self.sent.iter().map(Command::kind).collect()
    }

    fn record(&mut self, command: impl Into<Command>) -> Result<(), ConnectionFault> {
        self.sent.push(command.into());
        Ok(())
    }
}

impl NodeInstanceClient for RecordingClient {
    fn information_changed(&mut self, c: InformationChangedCommand) -> Result<(), ConnectionFault> {
        self.record(c)
    }
    fn values_changed(&mut self, c: ValuesChangedCommand) -> Result<(), ConnectionFault> {
        self.record(c)
    }
    fn pixmap_changed(&mut self, c: PixmapChangedCommand) -> Result<(), ConnectionFault> {
        self.record(c)
    }
    fn children_changed(&mut self, c: ChildrenChangedCommand) -> Result<(), ConnectionFault> {
        self.record(c)
    }
    fn state_preview_images_changed(
        &mut self,
        c: StatePreviewImageChangedCommand,
    ) -> Result<(), ConnectionFault> {
        self.record(c)
    }
    fn component_completed(&mut self, c: ComponentCompletedCommand) -> Result<(), ConnectionFault> {
        self.record(c)
    }
    fn token(&mut self, c: TokenCommand) -> Result<(), ConnectionFault> {
        self.record(c)
    }
    fn debug_output(&mut self, c: DebugOutputCommand) -> Result<(), ConnectionFault> {
        self.record(c)
    }
    fn puppet_alive(&mut self, c: PuppetAliveCommand) -> Result<(), ConnectionFault> {
        self.record(c)
    }
    fn synchronize(&mut self, c: SynchronizeCommand) -> Result<(), ConnectionFault> {
        self.record(c)
    }
    fn flush(&mut self) -> Result<(), ConnectionFault> {
        self.flushes += 1;
        Ok(())
    }
    fn bytes_to_write(&self) -> usize {
        self.backlog
    }
}
