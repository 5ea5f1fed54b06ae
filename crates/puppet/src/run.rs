// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session drivers.
//!
//! A live session multiplexes socket reads, socket writes, the render timer
//! and the heartbeat on one task. A captured session replays its input
//! synchronously, running a processing pass after every command that asked
//! for one.

use std::time::Duration;

use ni_core::{Clock, SystemClock};
use ni_wire::{Command, PuppetAliveCommand};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::collaborator::NodeInstanceClient;
use crate::dispatch::{Dispatched, ServerDispatcher, SessionState};
use crate::endpoint::{ChannelRole, ConnectionFault, Endpoint};
use crate::lifecycle::{startup, Config, Connection};
use crate::reporter::{ChangeReporter, PassOutcome};
use crate::scene::SceneGraph;

const READ_CHUNK: usize = 64 * 1024;

/// Why a session ended without a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The IDE sent EndProcess.
    EndRequested,
    /// The IDE closed the connection.
    PeerDisconnected,
    /// A captured input ran out of commands.
    InputExhausted,
}

ni_core::simple_display! {
    ExitReason {
        EndRequested => "end requested",
        PeerDisconnected => "peer disconnected",
        InputExhausted => "input exhausted",
    }
}

/// The puppet side of a session: dispatcher, scene and change reporter.
pub struct Puppet<C: Clock = SystemClock> {
    dispatcher: ServerDispatcher,
    reporter: ChangeReporter<C>,
    scene: SceneGraph,
}

impl Puppet<SystemClock> {
    pub fn new(config: &Config) -> Self {
        Self::with_clock(SystemClock, config)
    }
}

impl<C: Clock> Puppet<C> {
    pub fn with_clock(clock: C, config: &Config) -> Self {
        Self {
            dispatcher: ServerDispatcher::new(),
            reporter: ChangeReporter::with_clock(
                clock,
                config.backpressure_bytes,
                config.render_fast,
                config.render_slow,
            ),
            scene: SceneGraph::new(),
        }
    }

    /// Hand one incoming command to the scene.
    pub fn dispatch(&mut self, command: Command) -> Dispatched {
        let dispatched = self.dispatcher.dispatch(command, &mut self.scene);
        if self.dispatcher.session().render_requested() {
            self.reporter.wake();
        }
        dispatched
    }

    pub fn render_requested(&self) -> bool {
        self.dispatcher.session().render_requested()
    }

    /// Report everything that changed since the previous pass.
    pub fn process_pass(
        &mut self,
        client: &mut dyn NodeInstanceClient,
    ) -> Result<PassOutcome, ConnectionFault> {
        let session = self.dispatcher.session_mut();
        session.take_render_request();
        self.reporter.process_pass(&mut self.scene, client, session)
    }

    /// Time until the next processing pass is due.
    pub fn remaining(&self) -> Duration {
        self.reporter.remaining()
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn session(&self) -> &SessionState {
        self.dispatcher.session()
    }
}

/// Open the configured channels and drive the session to its end.
pub async fn run(config: &Config) -> Result<ExitReason, ConnectionFault> {
    let mut puppet = Puppet::new(config);
    let reason = match startup(config).await? {
        Connection::Live(stream) => run_live(stream, &mut puppet, config.puppet_alive).await?,
        Connection::Captured(mut endpoint) => run_captured(&mut endpoint, &mut puppet)?,
    };
    info!(%reason, "session ended");
    Ok(reason)
}

/// Drive a live session over `stream` until EndProcess or disconnect.
pub async fn run_live<S, C>(
    stream: S,
    puppet: &mut Puppet<C>,
    heartbeat: Duration,
) -> Result<ExitReason, ConnectionFault>
where
    S: AsyncRead + AsyncWrite + Unpin,
    C: Clock,
{
    let (mut reader, mut writer) = tokio::io::split(stream);
    let mut endpoint = Endpoint::live();
    let mut buf = vec![0u8; READ_CHUNK];
    let mut alive = interval_at(Instant::now() + heartbeat, heartbeat);
    alive.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let has_output = !endpoint.pending_output().is_empty();
        tokio::select! {
            read = reader.read(&mut buf) => {
                let n = match read {
                    Ok(0) => {
                        info!("IDE closed the connection");
                        endpoint.close()?;
                        return Ok(ExitReason::PeerDisconnected);
                    }
                    Ok(n) => n,
                    Err(e) => {
                        warn!(error = %e, "read from IDE failed");
                        endpoint.close()?;
                        return Ok(ExitReason::PeerDisconnected);
                    }
                };
                endpoint.feed(&buf[..n]);
                for command in endpoint.poll_incoming()? {
                    if puppet.dispatch(command) == Dispatched::EndProcess {
                        finish_live(&mut endpoint, &mut writer).await?;
                        return Ok(ExitReason::EndRequested);
                    }
                }
            }
            written = writer.write(endpoint.pending_output()), if has_output => {
                match written {
                    Ok(n) => endpoint.advance_written(n),
                    Err(e) => {
                        warn!(error = %e, "write to IDE failed");
                        endpoint.close()?;
                        return Ok(ExitReason::PeerDisconnected);
                    }
                }
            }
            _ = tokio::time::sleep(puppet.remaining()) => {
                puppet.process_pass(&mut endpoint)?;
            }
            _ = alive.tick() => {
                endpoint.puppet_alive(PuppetAliveCommand {})?;
            }
        }
    }
}

/// Write out queued output, then close the endpoint.
async fn finish_live<W>(endpoint: &mut Endpoint, writer: &mut W) -> Result<(), ConnectionFault>
where
    W: AsyncWrite + Unpin,
{
    let io = |source| ConnectionFault::Io { role: ChannelRole::Output, source };
    let queued = endpoint.pending_output().len();
    writer.write_all(endpoint.pending_output()).await.map_err(io)?;
    endpoint.advance_written(queued);
    writer.shutdown().await.map_err(io)?;
    endpoint.close()
}

/// Replay a captured session.
pub fn run_captured<C: Clock>(
    endpoint: &mut Endpoint,
    puppet: &mut Puppet<C>,
) -> Result<ExitReason, ConnectionFault> {
    let commands = endpoint.poll_incoming()?;
    info!(commands = commands.len(), "replaying captured stream");

    for command in commands {
        if puppet.dispatch(command) == Dispatched::EndProcess {
            endpoint.close()?;
            return Ok(ExitReason::EndRequested);
        }
        if puppet.render_requested() {
            puppet.process_pass(endpoint)?;
        }
    }

    endpoint.close()?;
    Ok(ExitReason::InputExhausted)
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
