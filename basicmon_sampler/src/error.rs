use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single metrics query. Never fatal: samplers turn it into a zero sample.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{0} is not reported on this platform")]
    Unsupported(&'static str),

    #[error("no mounted filesystem contains {}", .0.display())]
    PathNotMounted(PathBuf),

    #[error("network interface '{0}' not found")]
    InterfaceNotFound(String),

    #[error("metrics source failed: {0}")]
    Source(String),
}

/// The receiving side of a feed went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("feed receiver dropped")]
pub struct FeedClosed;
