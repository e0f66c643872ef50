//! Password reset for P5 dealer accounts.
//!
//! This crate resets the password of every `@p5.local` account in the auth
//! service to the shared dealer password. It can be used programmatically or
//! via the `p5-password-reset` binary.

use auth_admin_client::AdminClient;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

pub mod config;
pub mod errors;
pub mod runner;

pub use config::{load_env_file, ResetConfig};
pub use errors::Error;
pub use runner::{PasswordReset, ResetSummary, EMAIL_SUFFIX, NEW_PASSWORD, PAGE_SIZE};

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV_VAR: &str = "P5_RESET_LOG";

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Builds the admin client for a loaded configuration.
///
/// # Errors
///
/// Returns `Error::InvalidConfiguration` if the URL is unusable.
pub fn create_client(config: &ResetConfig) -> Result<AdminClient, Error> {
    let client = AdminClient::new(
        &config.url,
        SecretString::from(config.service_role_key.expose_secret().to_owned()),
    )
    .map_err(Error::InvalidConfiguration)?;

    info!(url = %config.url, "Created admin client for reset run");
    Ok(client)
}

/// Initialize logging for the reset tool.
///
/// Diagnostics go to stderr so that the progress lines on stdout stay readable.
/// The filter is taken from `P5_RESET_LOG` and defaults to `warn`.
pub fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
