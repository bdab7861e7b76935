//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use splice_core::PatchError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read {path}: {source}")]
    ReadTarget {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    WriteTarget {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read recipe {path}: {source}")]
    ReadRecipe {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse recipe {path}: {source}")]
    ParseRecipe {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid patch: {0}")]
    Patch(#[from] PatchError),
    #[error("failed to serialise report: {0}")]
    SerialiseReport(serde_json::Error),
    #[error("failed to emit report: {0}")]
    EmitReport(io::Error),
    #[error("{path} was left unchanged")]
    UnchangedTarget { path: Utf8PathBuf },
}
