use std::{io, path::PathBuf};

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that stop a password reset run.
///
/// Failures of individual user updates are not errors at this level. They are
/// reported on the console and the run continues with the next user.
#[derive(Error, Debug)]
pub enum Error {
    /// A required configuration value is missing or empty.
    ///
    /// Raised before any request is sent to the auth service.
    #[error("Configuration error: {0} is missing. Set it in the environment or in the .env file")]
    MissingConfiguration(&'static str),

    /// The configured service URL or key could not be used to build a client.
    #[error("Configuration error: {0}")]
    InvalidConfiguration(#[source] auth_admin_client::Error),

    /// An explicitly requested env file could not be loaded.
    #[error("Failed to load env file {path:?}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// Listing a page of users failed, so the remaining users cannot be reached.
    #[error("Failed to list users on page {page}: {source}")]
    ListUsers {
        page: u32,
        #[source]
        source: auth_admin_client::Error,
    },

    /// Writing progress output failed.
    #[error("Failed to write progress output.")]
    Output(#[from] io::Error),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Configuration problems exit with 1, everything that fails after the run
    /// has started exits with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MissingConfiguration(_)
            | Error::InvalidConfiguration(_)
            | Error::EnvFile { .. } => 1,
            Error::ListUsers { .. } | Error::Output(_) => 2,
        }
    }
}
