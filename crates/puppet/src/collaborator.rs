// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The two sides a dispatcher forwards commands to.

use ni_wire::{
    ChangeAuxiliaryCommand, ChangeBindingsCommand, ChangeFileUrlCommand, ChangeIdsCommand,
    ChangeLanguageCommand, ChangeNodeSourceCommand, ChangePreviewImageSizeCommand,
    ChangeSelectionCommand, ChangeStateCommand, ChangeValuesCommand, ChildrenChangedCommand,
    ClearSceneCommand, CompleteComponentCommand, ComponentCompletedCommand, CreateInstancesCommand,
    CreateSceneCommand, DebugOutputCommand, InformationChangedCommand, InputEventCommand,
    PixmapChangedCommand, PuppetAliveCommand, RemoveInstancesCommand, RemovePropertiesCommand,
    RemoveSharedMemoryCommand, ReparentInstancesCommand, RequestModelNodePreviewImageCommand,
    StatePreviewImageChangedCommand, SynchronizeCommand, TokenCommand, ValuesChangedCommand,
    View3DActionCommand,
};
use tracing::debug;

use crate::endpoint::ConnectionFault;
use crate::shared_memory::{self, SharedMemoryHooks};

/// Scene owner on the puppet side.
///
/// `Token` and `Synchronize` never reach this trait: the dispatcher queues
/// tokens and records synchronize ids for the change reporter.
pub trait NodeInstanceServer: SharedMemoryHooks {
    fn create_instances(&mut self, command: CreateInstancesCommand);
    fn change_file_url(&mut self, command: ChangeFileUrlCommand);
    fn create_scene(&mut self, command: CreateSceneCommand);
    fn clear_scene(&mut self, command: ClearSceneCommand);
    fn remove_instances(&mut self, command: RemoveInstancesCommand);
    fn remove_properties(&mut self, command: RemovePropertiesCommand);
    fn change_property_bindings(&mut self, command: ChangeBindingsCommand);
    fn change_property_values(&mut self, command: ChangeValuesCommand);
    fn change_auxiliary_values(&mut self, command: ChangeAuxiliaryCommand);
    fn reparent_instances(&mut self, command: ReparentInstancesCommand);
    fn change_ids(&mut self, command: ChangeIdsCommand);
    fn change_state(&mut self, command: ChangeStateCommand);
    fn complete_component(&mut self, command: CompleteComponentCommand);
    fn change_node_source(&mut self, command: ChangeNodeSourceCommand);

    /// Release shared-memory segments the peer no longer needs.
    fn remove_shared_memory(&mut self, command: RemoveSharedMemoryCommand) {
        shared_memory::release(self, &command.type_name, &command.key_numbers);
    }

    // Editor-view additions. Scenes without a 3D view or preview renderer
    // can ignore them.

    fn change_selection(&mut self, command: ChangeSelectionCommand) {
        debug!(count = command.instance_ids.len(), "selection change ignored");
    }

    fn input_event(&mut self, command: InputEventCommand) {
        debug!(kind = ?command.kind, "input event ignored");
    }

    fn view3d_action(&mut self, command: View3DActionCommand) {
        debug!(action = ?command.action, "3D view action ignored");
    }

    fn request_model_node_preview_image(&mut self, command: RequestModelNodePreviewImageCommand) {
        debug!(instance = %command.instance_id, "preview image request ignored");
    }

    fn change_language(&mut self, command: ChangeLanguageCommand) {
        debug!(language = %command.language, "language change ignored");
    }

    fn change_preview_image_size(&mut self, command: ChangePreviewImageSizeCommand) {
        debug!(width = command.width, height = command.height, "preview size change ignored");
    }
}

/// Receiver of puppet output: the IDE proxy, or the endpoint that writes it out.
pub trait NodeInstanceClient {
    fn information_changed(
        &mut self,
        command: InformationChangedCommand,
    ) -> Result<(), ConnectionFault>;
    fn values_changed(&mut self, command: ValuesChangedCommand) -> Result<(), ConnectionFault>;
    fn pixmap_changed(&mut self, command: PixmapChangedCommand) -> Result<(), ConnectionFault>;
    fn children_changed(&mut self, command: ChildrenChangedCommand) -> Result<(), ConnectionFault>;
    fn state_preview_images_changed(
        &mut self,
        command: StatePreviewImageChangedCommand,
    ) -> Result<(), ConnectionFault>;
    fn component_completed(
        &mut self,
        command: ComponentCompletedCommand,
    ) -> Result<(), ConnectionFault>;
    fn token(&mut self, command: TokenCommand) -> Result<(), ConnectionFault>;
    fn debug_output(&mut self, command: DebugOutputCommand) -> Result<(), ConnectionFault>;
    fn puppet_alive(&mut self, command: PuppetAliveCommand) -> Result<(), ConnectionFault>;
    fn synchronize(&mut self, command: SynchronizeCommand) -> Result<(), ConnectionFault>;

    /// Push buffered output towards the peer.
    fn flush(&mut self) -> Result<(), ConnectionFault>;

    /// Outgoing bytes not yet handed to the transport.
    fn bytes_to_write(&self) -> usize;
}
