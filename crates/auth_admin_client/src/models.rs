//! # Models
//!
//! Data types exchanged with the administrative user endpoints.
//!
//! Only the attributes this crate actually needs are modelled. Everything else
//! the service returns for a user (metadata, identities, timestamps, ...) is
//! ignored during deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// A user account as returned by the admin API.
///
/// The `id` is owned by the service and stays stable across pages. The `email`
/// may be missing entirely or be `null`, e.g. for phone-only accounts.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    /// The opaque identifier of the user
    pub id: String,
    /// The email address of the user, if any
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthUser {
    /// Returns `true` if the user has an email address ending with `suffix`.
    ///
    /// The comparison is a plain, case-sensitive suffix match. Users without an
    /// email never match.
    pub fn email_ends_with(&self, suffix: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|email| email.ends_with(suffix))
    }
}

/// Partial set of attributes sent to the update endpoint.
///
/// Unset fields are left out of the request body so the service keeps their
/// current values.
#[derive(Clone, Default, Serialize)]
pub struct UserAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserAttributes {
    /// Attributes that only change the password.
    pub fn password(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
        }
    }
}

// Never print passwords, not even at debug level.
impl std::fmt::Debug for UserAttributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAttributes")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Result of an update call.
///
/// `user` holds the echoed user when the service returned one. `raw` always
/// holds the response body exactly as received so it can be shown to the
/// operator when the update is not confirmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserResponse {
    pub user: Option<AuthUser>,
    pub raw: String,
}

impl UserResponse {
    /// Builds a response from a successful (2xx) response body.
    ///
    /// The service either echoes the user object directly or wraps it as
    /// `{"user": {...}}`. Both are accepted. Any other shape, including a body
    /// that is not JSON at all, leaves `user` empty and keeps the body in `raw`.
    pub fn from_body(raw: String) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(&raw) else {
            return Self { user: None, raw };
        };

        let candidate = match value.get("user") {
            Some(inner) => inner.clone(),
            None => value,
        };

        let user = match candidate {
            Value::Object(_) => serde_json::from_value::<AuthUser>(candidate).ok(),
            _ => None,
        };

        Self { user, raw }
    }

    /// Returns `true` if the response carries a non-empty user.
    pub fn has_user(&self) -> bool {
        self.user.as_ref().is_some_and(|user| !user.id.is_empty())
    }
}

/// One page of the user listing.
///
/// The `users` field may be missing or `null` at the end of the data, both are
/// read as an empty page.
#[derive(Debug, Default, Deserialize)]
pub struct UserPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub users: Vec<AuthUser>,
}

impl UserPage {
    /// Parses a listing response body.
    ///
    /// Accepts the `{"users": [...]}` envelope, a bare JSON array, `null`, or an
    /// empty body.
    pub fn from_body(raw: &str) -> Result<Self, Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        match serde_json::from_str::<Value>(raw)? {
            Value::Null => Ok(Self::default()),
            Value::Array(items) => {
                let users = serde_json::from_value(Value::Array(items))?;
                Ok(Self { users })
            }
            other => Ok(serde_json::from_value(other)?),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<AuthUser>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let users: Option<Vec<AuthUser>> = Option::deserialize(deserializer)?;
    Ok(users.unwrap_or_default())
}
