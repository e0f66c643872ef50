//! Configuration for the password reset run.
//!
//! The run needs exactly two values, both read from the environment. A `.env`
//! file in the working directory is loaded first so the values can live next
//! to the tool instead of in the shell profile.

use std::{
    env,
    path::{Path, PathBuf},
};

use secrecy::SecretString;
use tracing::{debug, info};

use crate::errors::Error;

/// Environment variable holding the project URL of the auth service.
pub const URL_ENV_VAR: &str = "SUPABASE_URL";

/// Environment variable holding the service role key.
pub const SERVICE_ROLE_KEY_ENV_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Connection settings for the auth service.
///
/// The service role key is kept as a [`SecretString`] so it does not show up
/// in `Debug` output or logs.
#[derive(Debug)]
pub struct ResetConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`
    pub url: String,
    /// Privileged key granting access to the admin user API
    pub service_role_key: SecretString,
}

impl ResetConfig {
    /// Loads the configuration from the process environment.
    ///
    /// Required environment variables:
    /// - `SUPABASE_URL`
    /// - `SUPABASE_SERVICE_ROLE_KEY`
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingConfiguration` naming the first variable that is
    /// unset or empty.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(Error::MissingConfiguration(name))
        };

        let url = required(URL_ENV_VAR)?;
        let service_role_key = SecretString::from(required(SERVICE_ROLE_KEY_ENV_VAR)?);

        debug!(url = %url, "Loaded reset configuration");

        Ok(Self {
            url,
            service_role_key,
        })
    }
}

/// Loads environment variables from an env file.
///
/// With an explicit `path` the file must exist and parse. Without one, `.env`
/// is searched for from the working directory upwards and silently skipped if
/// there is none. Variables already set in the process environment win.
///
/// Returns the path of the file that was loaded, if any.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, Error> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(|source| Error::EnvFile {
                path: path.to_path_buf(),
                source,
            })?;
            info!(path = ?path, "Loaded env file");
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenvy::dotenv() {
            Ok(found) => {
                info!(path = ?found, "Loaded env file");
                Ok(Some(found))
            }
            Err(e) => {
                debug!(error = %e, "No env file loaded");
                Ok(None)
            }
        },
    }
}
