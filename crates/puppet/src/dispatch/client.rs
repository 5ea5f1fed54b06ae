// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use ni_wire::Command;
use tracing::debug;

use super::{wrong_direction, Dispatched};
use crate::collaborator::NodeInstanceClient;
use crate::endpoint::ConnectionFault;

/// IDE-side dispatcher: forwards puppet output to a [`NodeInstanceClient`].
#[derive(Debug)]
pub struct ClientDispatcher {
    last_synchronize_id: i32,
}

impl Default for ClientDispatcher {
    fn default() -> Self {
        Self { last_synchronize_id: -1 }
    }
}

impl ClientDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest synchronize id echoed by the puppet, `-1` until one arrives.
    pub fn last_synchronize_id(&self) -> i32 {
        self.last_synchronize_id
    }

    pub fn dispatch(
        &mut self,
        command: Command,
        client: &mut dyn NodeInstanceClient,
    ) -> Result<Dispatched, ConnectionFault> {
        debug!(command = command.kind().name(), "dispatching to client");
        let kind = command.kind();
        match command {
            Command::InformationChanged(c) => client.information_changed(c)?,
            Command::ValuesChanged(c) => client.values_changed(c)?,
            Command::PixmapChanged(c) => client.pixmap_changed(c)?,
            Command::ChildrenChanged(c) => client.children_changed(c)?,
            Command::StatePreviewImageChanged(c) => client.state_preview_images_changed(c)?,
            Command::ComponentCompleted(c) => client.component_completed(c)?,
            Command::Token(c) => client.token(c)?,
            Command::DebugOutput(c) => client.debug_output(c)?,
            Command::PuppetAlive(c) => client.puppet_alive(c)?,
            Command::Synchronize(c) => self.last_synchronize_id = c.synchronize_id,
            _ => return Ok(wrong_direction(kind, "IDE")),
        }
        Ok(Dispatched::Handled)
    }
}
