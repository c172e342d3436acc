// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon log setup: daily-rotated file under the state directory, plus
//! stderr when running in the foreground.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::lifecycle::LifecycleError;

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held
/// for the life of the process.
pub fn init(
    logs_dir: &Path,
    filter: &str,
    foreground: bool,
) -> Result<WorkerGuard, LifecycleError> {
    std::fs::create_dir_all(logs_dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("bkd")
        .filename_suffix("log")
        .build(logs_dir)
        .map_err(|e| LifecycleError::Logging(e.to_string()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_new(filter).map_err(|e| LifecycleError::Logging(e.to_string()))?;
    let file_layer = fmt::layer().with_writer(writer).with_ansi(false);
    let stderr_layer = foreground.then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| LifecycleError::Logging(e.to_string()))?;

    Ok(guard)
}
