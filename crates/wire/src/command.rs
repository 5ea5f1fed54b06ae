// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command value types exchanged between the IDE and the puppet.
//!
//! [`Command`] is a closed sum type. Its tag ([`CommandKind`]) is written on the
//! wire as the payload type name, so both processes agree on identity as long
//! as they are built from the same protocol version.

use ni_core::{InstanceId, PropertyValue};
use serde::{Deserialize, Serialize};

use crate::containers::{
    AddImportContainer, IdContainer, ImageContainer, InformationContainer, InstanceContainer,
    MockupTypeContainer, PropertyAbstractContainer, PropertyBindingContainer,
    PropertyValueContainer, ReparentContainer,
};

/// Which process a command is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// IDE → puppet
    ToServer,
    /// puppet → IDE
    ToClient,
    Both,
}

impl Direction {
    pub fn reaches_server(self) -> bool {
        matches!(self, Direction::ToServer | Direction::Both)
    }

    pub fn reaches_client(self) -> bool {
        matches!(self, Direction::ToClient | Direction::Both)
    }
}

/// Generates [`Command`], [`CommandKind`] and the per-variant glue.
///
/// Each entry names the variant, its payload struct and its [`Direction`].
macro_rules! define_commands {
    ($( $(#[$meta:meta])* $variant:ident($payload:ident) => $direction:ident ),+ $(,)?) => {
        /// A protocol command.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Command {
            $( $(#[$meta])* $variant($payload), )+
        }

        /// Runtime identity of a [`Command`] variant.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum CommandKind {
            $( $variant, )+
        }

        impl CommandKind {
            pub const ALL: &'static [CommandKind] = &[ $( CommandKind::$variant, )+ ];

            /// Stable wire tag.
            pub fn name(self) -> &'static str {
                match self {
                    $( CommandKind::$variant => stringify!($payload), )+
                }
            }

            pub fn direction(self) -> Direction {
                match self {
                    $( CommandKind::$variant => Direction::$direction, )+
                }
            }
        }

        impl Command {
            pub fn kind(&self) -> CommandKind {
                match self {
                    $( Command::$variant(_) => CommandKind::$variant, )+
                }
            }

            /// Serialize the payload (without tag or framing).
            pub fn encode_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
                match self {
                    $( Command::$variant(payload) => serde_json::to_vec(payload), )+
                }
            }

            /// Parse a payload previously written by [`Command::encode_payload`].
            pub fn decode_payload(kind: CommandKind, bytes: &[u8]) -> Result<Self, serde_json::Error> {
                match kind {
                    $( CommandKind::$variant => {
                        serde_json::from_slice::<$payload>(bytes).map(Command::$variant)
                    } )+
                }
            }
        }

        impl std::fmt::Display for Command {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $( Command::$variant(payload) => write!(f, "{:?}", payload), )+
                }
            }
        }

        $(
            impl From<$payload> for Command {
                fn from(payload: $payload) -> Self {
                    Command::$variant(payload)
                }
            }
        )+
    };
}

define_commands! {
    CreateInstances(CreateInstancesCommand) => ToServer,
    CreateScene(CreateSceneCommand) => ToServer,
    ClearScene(ClearSceneCommand) => ToServer,
    RemoveInstances(RemoveInstancesCommand) => ToServer,
    RemoveProperties(RemovePropertiesCommand) => ToServer,
    ChangeFileUrl(ChangeFileUrlCommand) => ToServer,
    ChangePropertyValues(ChangeValuesCommand) => ToServer,
    ChangePropertyBindings(ChangeBindingsCommand) => ToServer,
    ChangeAuxiliaryValues(ChangeAuxiliaryCommand) => ToServer,
    ReparentInstances(ReparentInstancesCommand) => ToServer,
    ChangeIds(ChangeIdsCommand) => ToServer,
    ChangeState(ChangeStateCommand) => ToServer,
    CompleteComponent(CompleteComponentCommand) => ToServer,
    ChangeNodeSource(ChangeNodeSourceCommand) => ToServer,
    RemoveSharedMemory(RemoveSharedMemoryCommand) => ToServer,
    EndProcess(EndPuppetCommand) => ToServer,
    ChangeSelection(ChangeSelectionCommand) => ToServer,
    InputEvent(InputEventCommand) => ToServer,
    View3DAction(View3DActionCommand) => ToServer,
    RequestModelNodePreviewImage(RequestModelNodePreviewImageCommand) => ToServer,
    ChangeLanguage(ChangeLanguageCommand) => ToServer,
    ChangePreviewImageSize(ChangePreviewImageSizeCommand) => ToServer,
    InformationChanged(InformationChangedCommand) => ToClient,
    ValuesChanged(ValuesChangedCommand) => ToClient,
    PixmapChanged(PixmapChangedCommand) => ToClient,
    ChildrenChanged(ChildrenChangedCommand) => ToClient,
    StatePreviewImageChanged(StatePreviewImageChangedCommand) => ToClient,
    ComponentCompleted(ComponentCompletedCommand) => ToClient,
    DebugOutput(DebugOutputCommand) => ToClient,
    PuppetAlive(PuppetAliveCommand) => ToClient,
    Token(TokenCommand) => Both,
    Synchronize(SynchronizeCommand) => Both,
}

impl CommandKind {
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

// --- IDE → puppet ---

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateInstancesCommand {
    pub instances: Vec<InstanceContainer>,
}

/// Full scene description sent once after the puppet connects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateSceneCommand {
    pub instances: Vec<InstanceContainer>,
    pub reparent_instances: Vec<ReparentContainer>,
    pub ids: Vec<IdContainer>,
    pub value_changes: Vec<PropertyValueContainer>,
    pub binding_changes: Vec<PropertyBindingContainer>,
    pub auxiliary_changes: Vec<PropertyValueContainer>,
    pub imports: Vec<AddImportContainer>,
    pub mock_types: Vec<MockupTypeContainer>,
    pub file_url: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClearSceneCommand {}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RemoveInstancesCommand {
    pub instance_ids: Vec<InstanceId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RemovePropertiesCommand {
    pub properties: Vec<PropertyAbstractContainer>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeFileUrlCommand {
    pub file_url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeValuesCommand {
    pub value_changes: Vec<PropertyValueContainer>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeBindingsCommand {
    pub binding_changes: Vec<PropertyBindingContainer>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeAuxiliaryCommand {
    pub auxiliary_changes: Vec<PropertyValueContainer>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReparentInstancesCommand {
    pub reparent_instances: Vec<ReparentContainer>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeIdsCommand {
    pub ids: Vec<IdContainer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeStateCommand {
    pub state_instance_id: InstanceId,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompleteComponentCommand {
    pub instances: Vec<InstanceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeNodeSourceCommand {
    pub instance_id: InstanceId,
    pub node_source: String,
}

/// Releases shared-memory segments of one type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RemoveSharedMemoryCommand {
    pub type_name: String,
    pub key_numbers: Vec<i32>,
}

impl RemoveSharedMemoryCommand {
    pub fn new(type_name: impl Into<String>, key_numbers: Vec<i32>) -> Self {
        Self { type_name: type_name.into(), key_numbers }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EndPuppetCommand {}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeSelectionCommand {
    pub instance_ids: Vec<InstanceId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEventKind {
    MouseMove,
    MouseButtonPress,
    MouseButtonRelease,
    MouseDoubleClick,
    Wheel,
    KeyPress,
    KeyRelease,
}

/// Pointer or key input forwarded from the editor view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEventCommand {
    pub kind: InputEventKind,
    #[serde(with = "ni_core::value::float")]
    pub x: f64,
    #[serde(with = "ni_core::value::float")]
    pub y: f64,
    pub button: u32,
    pub buttons: u32,
    pub modifiers: u32,
    pub wheel_delta: i32,
    pub key: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View3DActionKind {
    MoveTool,
    ScaleTool,
    RotateTool,
    FitToView,
    ShowGrid,
    EditLight,
    CameraToggle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View3DActionCommand {
    pub action: View3DActionKind,
    pub value: PropertyValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestModelNodePreviewImageCommand {
    pub instance_id: InstanceId,
    pub width: u32,
    pub height: u32,
    pub component_path: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeLanguageCommand {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangePreviewImageSizeCommand {
    pub width: u32,
    pub height: u32,
}

// --- puppet → IDE ---

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InformationChangedCommand {
    pub informations: Vec<InformationContainer>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValuesChangedCommand {
    pub value_changes: Vec<PropertyValueContainer>,
    /// Key of a `Values` segment holding the changes, `0` when sent inline.
    pub key_number: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PixmapChangedCommand {
    pub images: Vec<ImageContainer>,
}

/// Current children of one parent, or of no parent when `parent_instance_id` is `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChildrenChangedCommand {
    pub parent_instance_id: Option<InstanceId>,
    pub children: Vec<InstanceId>,
    pub informations: Vec<InformationContainer>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatePreviewImageChangedCommand {
    pub previews: Vec<ImageContainer>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentCompletedCommand {
    pub instances: Vec<InstanceId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebugOutputKind {
    Debug,
    Warning,
    Critical,
    Fatal,
    Information,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugOutputCommand {
    pub kind: DebugOutputKind,
    pub text: String,
    pub instance_ids: Vec<InstanceId>,
}

/// Heartbeat; its absence tells the IDE the puppet has died.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PuppetAliveCommand {}

// --- both directions ---

/// Request/response pairing marker, echoed back after the next render pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenCommand {
    pub token_name: String,
    pub token_number: i32,
    pub instance_ids: Vec<InstanceId>,
}

/// Asks the peer to acknowledge everything received so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynchronizeCommand {
    pub synchronize_id: i32,
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
