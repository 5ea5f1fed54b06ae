// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node-instance puppet binary.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use ni_puppet::lifecycle::{Config, Mode};
use ni_puppet::{env, run};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ni-puppet", version)]
#[command(about = "Hosts a scene for the IDE over the node-instance protocol")]
struct Args {
    /// Local socket name, or the captured input file with --read-captured-stream
    endpoint: String,

    /// Record outgoing commands to this file (captured mode)
    #[arg(requires = "read_captured_stream", conflicts_with = "control")]
    output: Option<PathBuf>,

    /// Compare outgoing commands against this recording (captured mode)
    #[arg(long, requires = "read_captured_stream")]
    control: Option<PathBuf>,

    /// Replay a captured command stream instead of connecting
    #[arg(long)]
    read_captured_stream: bool,
}

impl Args {
    fn mode(self) -> Mode {
        if self.read_captured_stream {
            Mode::Captured { input: PathBuf::from(self.endpoint), output: self.output, control: self.control }
        } else {
            Mode::Live { endpoint: self.endpoint }
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env::log_filter()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::load(args.mode());
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    match runtime.block_on(run(&config)) {
        Ok(reason) => {
            info!(%reason, "puppet exiting");
            Ok(ExitCode::SUCCESS)
        }
        Err(fault) => {
            error!(error = %fault, "puppet failed");
            Ok(ExitCode::FAILURE)
        }
    }
}
