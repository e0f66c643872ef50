//! Crate for interacting with the administrative user API of the auth service.
//!
//! This crate provides a client for making privileged requests to the
//! `/auth/v1/admin/users` endpoints, authenticated with the project's service
//! role key.

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{AuthUser, UserAttributes, UserPage, UserResponse};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Path of the admin user collection, relative to the service URL.
const ADMIN_USERS_PATH: &str = "auth/v1/admin/users";

/// Trait for the admin user operations the reset tooling relies on.
#[async_trait]
pub trait UserAdminClient: Send + Sync {
    /// Lists one page of users.
    ///
    /// Pages are 1-based. An empty vector means there are no more users.
    ///
    /// # Errors
    /// Returns an `Error` if the request fails or the response cannot be parsed.
    async fn list_users(&self, page: u32, per_page: u32) -> Result<Vec<AuthUser>, Error>;

    /// Updates the given attributes of a single user.
    ///
    /// Only the fields set in `attributes` are changed.
    ///
    /// # Errors
    /// Returns an `Error` if the request fails or the service rejects it.
    async fn update_user_by_id(
        &self,
        user_id: &str,
        attributes: &UserAttributes,
    ) -> Result<UserResponse, Error>;
}

/// A client for the admin user API, authenticated with a service role key.
#[derive(Debug)]
pub struct AdminClient {
    client: Client,
    base_url: Url,
    service_role_key: SecretString,
}

impl AdminClient {
    /// Creates a new client for the service at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The project URL, e.g. `https://xyzcompany.supabase.co`.
    /// * `service_role_key` - The service role key of the project.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBaseUrl` if `base_url` is not an absolute http(s)
    /// URL, or `Error::Transport` if the HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use auth_admin_client::{AdminClient, UserAdminClient};
    /// use secrecy::SecretString;
    ///
    /// # async fn example() -> Result<(), auth_admin_client::Error> {
    /// let key = SecretString::from("service-role-key".to_string());
    /// let client = AdminClient::new("https://xyzcompany.supabase.co", key)?;
    ///
    /// let users = client.list_users(1, 50).await?;
    /// println!("First page holds {} users", users.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(base_url: &str, service_role_key: SecretString) -> Result<Self, Error> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder().build()?;

        info!(base_url = %base_url, "Created auth admin client");

        Ok(Self {
            client,
            base_url,
            service_role_key,
        })
    }

    /// The URL of the user collection, or of a single user when `user_id` is given.
    fn users_url(&self, user_id: Option<&str>) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| Error::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?;
            segments.pop_if_empty();
            segments.extend(ADMIN_USERS_PATH.split('/'));
            if let Some(id) = user_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let key = self.service_role_key.expose_secret();
        self.client
            .request(method, url)
            .header("apikey", key)
            .header(header::AUTHORIZATION, format!("Bearer {key}"))
    }
}

#[async_trait]
impl UserAdminClient for AdminClient {
    #[instrument(skip(self))]
    async fn list_users(&self, page: u32, per_page: u32) -> Result<Vec<AuthUser>, Error> {
        let url = self.users_url(None)?;
        debug!(url = %url, "Requesting user page");

        let response = self
            .request(Method::GET, url)
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await
            .map_err(|e| {
                error!(page = page, error = %e, "Failed to send list users request");
                Error::Transport(e)
            })?;

        let body = read_success_body(response, "Failed to list users").await?;
        let users = UserPage::from_body(&body)?.users;

        debug!(page = page, count = users.len(), "Retrieved user page");
        Ok(users)
    }

    #[instrument(skip(self, attributes), fields(user_id = %user_id))]
    async fn update_user_by_id(
        &self,
        user_id: &str,
        attributes: &UserAttributes,
    ) -> Result<UserResponse, Error> {
        let url = self.users_url(Some(user_id))?;

        let response = self
            .request(Method::PUT, url)
            .json(attributes)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send update user request");
                Error::Transport(e)
            })?;

        let body = read_success_body(response, "Failed to update user").await?;
        let result = UserResponse::from_body(body);

        if result.has_user() {
            debug!("User updated");
        } else {
            warn!(body = result.raw.as_str(), "Update response did not contain a user");
        }
        Ok(result)
    }
}

/// Reads the response body, mapping non-success statuses to an `Error`.
async fn read_success_body(response: Response, message: &str) -> Result<String, Error> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    error!(
        status = status.as_u16(),
        error_message = body.as_str(),
        "{}. Received an error from the admin API",
        message
    );

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized(body),
        StatusCode::NOT_FOUND => Error::NotFound(body),
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimitExceeded(body),
        _ => Error::Api {
            status: status.as_u16(),
            message: body,
        },
    })
}

fn parse_base_url(raw: &str) -> Result<Url, Error> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
