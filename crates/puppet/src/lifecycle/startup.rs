// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opening the command channels.

use tokio::net::UnixStream;
use tracing::info;

use super::{Config, Mode};
use crate::endpoint::{ConnectionFault, Endpoint};

/// An opened channel, ready for its driver.
pub enum Connection {
    Live(UnixStream),
    Captured(Endpoint),
}

/// Open the channels `config` names. Failure here is fatal.
pub async fn startup(config: &Config) -> Result<Connection, ConnectionFault> {
    match &config.mode {
        Mode::Live { endpoint } => {
            info!(%endpoint, "connecting to IDE");
            let stream = UnixStream::connect(endpoint)
                .await
                .map_err(|source| ConnectionFault::Connect { name: endpoint.clone(), source })?;
            info!("connected");
            Ok(Connection::Live(stream))
        }
        Mode::Captured { input, output, control } => {
            let endpoint = Endpoint::open_captured(input, output.as_deref(), control.as_deref())?;
            Ok(Connection::Captured(endpoint))
        }
    }
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod tests;
