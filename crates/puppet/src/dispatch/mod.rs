// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command dispatch: routes each incoming command to the matching
//! collaborator operation, intercepting the session-level commands.

mod client;

pub use client::ClientDispatcher;

use std::collections::VecDeque;

use ni_wire::{Command, CommandKind, TokenCommand};
use tracing::{debug, error};

use crate::collaborator::NodeInstanceServer;

/// What a dispatcher did with a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    Handled,
    /// The peer asked this process to shut down.
    EndProcess,
    /// The command is not addressed to this side of the connection.
    Ignored,
}

/// Per-connection state the change reporter consumes.
#[derive(Debug)]
pub struct SessionState {
    /// Latest synchronize id from the peer, `-1` until one arrives.
    pub last_requested_sync_id: i32,
    pending_tokens: VecDeque<TokenCommand>,
    render_requested: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self { last_requested_sync_id: -1, pending_tokens: VecDeque::new(), render_requested: false }
    }

    /// Remember a token until the next processing pass echoes it back.
    pub fn queue_token(&mut self, token: TokenCommand) {
        self.pending_tokens.push_back(token);
    }

    /// All queued tokens, oldest first.
    pub fn take_tokens(&mut self) -> Vec<TokenCommand> {
        self.pending_tokens.drain(..).collect()
    }

    pub fn pending_tokens(&self) -> usize {
        self.pending_tokens.len()
    }

    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    pub fn render_requested(&self) -> bool {
        self.render_requested
    }

    /// Clear the render request, returning whether one was pending.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }
}

/// Puppet-side dispatcher.
#[derive(Debug, Default)]
pub struct ServerDispatcher {
    session: SessionState,
}

impl ServerDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// Forward one command to `server`.
    ///
    /// Scene-changing commands also request a processing pass. `EndProcess`
    /// is reported to the caller, which owns shutdown.
    pub fn dispatch(&mut self, command: Command, server: &mut dyn NodeInstanceServer) -> Dispatched {
        debug!(command = command.kind().name(), "dispatching");
        let kind = command.kind();
        match command {
            Command::CreateInstances(c) => server.create_instances(c),
            Command::CreateScene(c) => server.create_scene(c),
            Command::ClearScene(c) => server.clear_scene(c),
            Command::RemoveInstances(c) => server.remove_instances(c),
            Command::RemoveProperties(c) => server.remove_properties(c),
            Command::ChangeFileUrl(c) => server.change_file_url(c),
            Command::ChangePropertyValues(c) => server.change_property_values(c),
            Command::ChangePropertyBindings(c) => server.change_property_bindings(c),
            Command::ChangeAuxiliaryValues(c) => server.change_auxiliary_values(c),
            Command::ReparentInstances(c) => server.reparent_instances(c),
            Command::ChangeIds(c) => server.change_ids(c),
            Command::ChangeState(c) => server.change_state(c),
            Command::CompleteComponent(c) => server.complete_component(c),
            Command::ChangeNodeSource(c) => server.change_node_source(c),
            Command::ChangeSelection(c) => server.change_selection(c),
            Command::InputEvent(c) => server.input_event(c),
            Command::View3DAction(c) => server.view3d_action(c),
            Command::RequestModelNodePreviewImage(c) => server.request_model_node_preview_image(c),
            Command::ChangeLanguage(c) => server.change_language(c),
            Command::ChangePreviewImageSize(c) => server.change_preview_image_size(c),
            Command::Token(c) => self.session.queue_token(c),
            Command::RemoveSharedMemory(c) => {
                server.remove_shared_memory(c);
                return Dispatched::Handled;
            }
            Command::Synchronize(c) => {
                self.session.last_requested_sync_id = c.synchronize_id;
                return Dispatched::Handled;
            }
            Command::EndProcess(_) => return Dispatched::EndProcess,
            Command::InformationChanged(_)
            | Command::ValuesChanged(_)
            | Command::PixmapChanged(_)
            | Command::ChildrenChanged(_)
            | Command::StatePreviewImageChanged(_)
            | Command::ComponentCompleted(_)
            | Command::DebugOutput(_)
            | Command::PuppetAlive(_) => return wrong_direction(kind, "puppet"),
        }
        self.session.request_render();
        Dispatched::Handled
    }
}

/// A command addressed to the other side. A programming error in the peer:
/// fatal in debug builds, logged and dropped otherwise.
pub(crate) fn wrong_direction(kind: CommandKind, receiver: &str) -> Dispatched {
    error!(command = kind.name(), receiver, "command sent in the wrong direction");
    debug_assert!(
        kind.direction().reaches_server() == (receiver == "puppet"),
        "{} is not addressed to the {}",
        kind.name(),
        receiver
    );
    Dispatched::Ignored
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
