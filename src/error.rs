//! Unified error handling for slircbot.
//!
//! Every failure in the bot is recoverable except a broken configuration at
//! startup: connect errors feed the endpoint retry loop, resource load errors
//! leave the affected module inert.

use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Connect Errors (endpoint retry loop)
// ============================================================================

/// Reasons a connection attempt to one endpoint failed.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection closed during registration")]
    ClosedDuringRegistration,

    #[error("registration timed out")]
    RegistrationTimeout,

    #[error("server refused registration: {0}")]
    Refused(String),
}

impl ConnectError {
    /// True for failures of the transport itself, false for protocol-level
    /// refusals; only changes how loudly the retry loop logs.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

// ============================================================================
// Resource Errors (word lists, action files)
// ============================================================================

/// Failure to read a module resource file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
