// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use ni_wire::{
    ChildrenChangedCommand, Command, ComponentCompletedCommand, DebugOutputCommand,
    InformationChangedCommand, PixmapChangedCommand, PuppetAliveCommand,
    StatePreviewImageChangedCommand, SynchronizeCommand, TokenCommand, ValuesChangedCommand,
};

use super::{ConnectionFault, Endpoint};
use crate::collaborator::NodeInstanceClient;

impl NodeInstanceClient for Endpoint {
    fn information_changed(
        &mut self,
        command: InformationChangedCommand,
    ) -> Result<(), ConnectionFault> {
        self.send(&Command::from(command))
    }

    fn values_changed(&mut self, command: ValuesChangedCommand) -> Result<(), ConnectionFault> {
        self.send(&Command::from(command))
    }

    fn pixmap_changed(&mut self, command: PixmapChangedCommand) -> Result<(), ConnectionFault> {
        self.send(&Command::from(command))
    }

    fn children_changed(&mut self, command: ChildrenChangedCommand) -> Result<(), ConnectionFault> {
        self.send(&Command::from(command))
    }

    fn state_preview_images_changed(
        &mut self,
        command: StatePreviewImageChangedCommand,
    ) -> Result<(), ConnectionFault> {
        self.send(&Command::from(command))
    }

    fn component_completed(
        &mut self,
        command: ComponentCompletedCommand,
    ) -> Result<(), ConnectionFault> {
        self.send(&Command::from(command))
    }

    fn token(&mut self, command: TokenCommand) -> Result<(), ConnectionFault> {
        self.send(&Command::from(command))
    }

    fn debug_output(&mut self, command: DebugOutputCommand) -> Result<(), ConnectionFault> {
        self.send(&Command::from(command))
    }

    fn puppet_alive(&mut self, command: PuppetAliveCommand) -> Result<(), ConnectionFault> {
        self.send(&Command::from(command))
    }

    fn synchronize(&mut self, command: SynchronizeCommand) -> Result<(), ConnectionFault> {
        self.send(&Command::from(command))
    }

    fn flush(&mut self) -> Result<(), ConnectionFault> {
        Endpoint::flush(self)
    }

    fn bytes_to_write(&self) -> usize {
        Endpoint::bytes_to_write(self)
    }
}
