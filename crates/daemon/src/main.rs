// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bkd`: accepts build status reports from agents over HTTP.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use bk_daemon::lifecycle::{self, Config, LifecycleError};
use bk_daemon::listener::{ListenCtx, Listener};
use bk_daemon::{env, logging};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "bkd", version, about = "Build status daemon")]
struct Args {
    /// Address to listen on (overrides BK_LISTEN_ADDR)
    #[arg(long)]
    listen_addr: Option<String>,

    /// State directory (overrides BK_STATE_DIR)
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Also log to stderr
    #[arg(long)]
    foreground: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("bkd: failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };
    match runtime.block_on(run(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("bkd: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<Config, LifecycleError> {
    let mut config = match &args.state_dir {
        Some(dir) => Config::load_from(dir.clone())?,
        None => Config::load()?,
    };
    if let Some(addr) = &args.listen_addr {
        config.listen_addr = lifecycle::parse_listen_addr(addr)?;
    }
    Ok(config)
}

async fn run(args: Args) -> Result<(), LifecycleError> {
    let config = load_config(&args)?;
    let _log_guard = logging::init(&config.logs_path, &env::log_filter(), args.foreground)?;

    let lifecycle::StartupResult { mut daemon, listener } = lifecycle::startup(&config).await?;

    let shutdown = CancellationToken::new();
    let ctx = Arc::new(ListenCtx::new(
        daemon.shared_store(),
        config.max_body_bytes,
        config.request_timeout,
    ));
    let listener_task = tokio::spawn(Listener::new(listener, ctx).run(shutdown.clone()));

    let mut ticker = tokio::time::interval(config.checkpoint_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let signal = shutdown_signal();
    tokio::pin!(signal);

    loop {
        tokio::select! {
            _ = &mut signal => break,
            _ = ticker.tick() => {
                if let Err(e) = daemon.checkpoint() {
                    warn!("checkpoint failed: {}", e);
                }
            }
        }
    }

    info!("shutdown requested");
    shutdown.cancel();
    if let Err(e) = listener_task.await {
        warn!("listener task failed: {}", e);
    }
    daemon.shutdown()
}

/// Resolves on ctrl-c or, on unix, SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
