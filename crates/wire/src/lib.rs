// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node-instance protocol: command value types and frame codec.
//!
//! Wire format: 4-byte length prefix (host byte order) + sequence number +
//! command tag + JSON payload

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod codec;
mod command;
mod containers;

pub use codec::{
    encode_frame, DecodeOutcome, Frame, FrameDecoder, FrameEncoder, ProtocolError,
    LENGTH_PREFIX_LEN, MAX_BLOCK_LEN,
};
pub use command::{
    ChangeAuxiliaryCommand, ChangeBindingsCommand, ChangeFileUrlCommand, ChangeIdsCommand,
    ChangeLanguageCommand, ChangeNodeSourceCommand, ChangePreviewImageSizeCommand,
    ChangeSelectionCommand, ChangeStateCommand, ChangeValuesCommand, ChildrenChangedCommand,
    ClearSceneCommand, Command, CommandKind, CompleteComponentCommand, ComponentCompletedCommand,
    CreateInstancesCommand, CreateSceneCommand, DebugOutputCommand, DebugOutputKind, Direction,
    EndPuppetCommand, InformationChangedCommand, InputEventCommand, InputEventKind,
    PixmapChangedCommand, PuppetAliveCommand, RemoveInstancesCommand, RemovePropertiesCommand,
    RemoveSharedMemoryCommand, ReparentInstancesCommand, RequestModelNodePreviewImageCommand,
    StatePreviewImageChangedCommand, SynchronizeCommand, TokenCommand, ValuesChangedCommand,
    View3DActionCommand, View3DActionKind,
};
pub use containers::{
    AddImportContainer, IdContainer, ImageContainer, InformationContainer, InformationName,
    InstanceContainer, MockupTypeContainer, NodeMetaType, NodeSourceKind,
    PropertyAbstractContainer, PropertyBindingContainer, PropertyValueContainer,
    ReparentContainer,
};
