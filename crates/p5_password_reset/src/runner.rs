//! The password reset run.
//!
//! Walks the user directory page by page and sets a fixed password on every
//! account whose email ends with the P5 domain suffix. Progress is written to
//! the given output as one line per page and per user. A failed update is
//! reported and skipped; only a failed page listing stops the run.

use std::io::Write;

use auth_admin_client::{AuthUser, UserAdminClient, UserAttributes};
use tracing::{debug, error, info, instrument, warn};

use crate::errors::Error;

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;

/// Only accounts with an email ending in this suffix are touched.
pub const EMAIL_SUFFIX: &str = "@p5.local";

/// The password every matching account ends up with.
pub const NEW_PASSWORD: &str = "sonyP5!";

/// Number of users requested per page.
pub const PAGE_SIZE: u32 = 50;

/// Counters collected during a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResetSummary {
    /// Pages requested, including the final empty one
    pub pages_fetched: u32,
    /// Users returned across all pages
    pub users_seen: usize,
    /// Users whose email matched the suffix
    pub users_matched: usize,
    /// Updates confirmed by an echoed user
    pub users_updated: usize,
    /// Updates that failed or were not confirmed
    pub users_failed: usize,
}

/// Outcome of a single update.
enum UpdateOutcome {
    Confirmed,
    Failed(String),
}

/// Resets the password of all matching accounts.
pub struct PasswordReset<C> {
    client: C,
}

impl<C: UserAdminClient> PasswordReset<C> {
    /// Create a new reset run on top of an admin client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Returns `true` if the user is one of the accounts to reset.
    pub fn is_target(user: &AuthUser) -> bool {
        user.email_ends_with(EMAIL_SUFFIX)
    }

    /// Runs the reset until the first empty page.
    ///
    /// # Errors
    ///
    /// Returns `Error::ListUsers` if a page cannot be listed, after printing how
    /// many passwords were set up to that point. Returns `Error::Output` if
    /// progress cannot be written. Failed user updates are not errors.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<ResetSummary, Error> {
        let mut summary = ResetSummary::default();
        let mut page = 1u32;

        info!(
            suffix = EMAIL_SUFFIX,
            per_page = PAGE_SIZE,
            "Starting password reset"
        );

        loop {
            debug!(page = page, "Fetching page {} of users", page);

            let users = match self.client.list_users(page, PAGE_SIZE).await {
                Ok(users) => users,
                Err(source) => {
                    error!(page = page, error = %source, "Failed to list users");
                    writeln!(out)?;
                    writeln!(
                        out,
                        "⚠️ Stopped on page {}: {} passwords set for {} before the failure.",
                        page, summary.users_updated, EMAIL_SUFFIX
                    )?;
                    return Err(Error::ListUsers { page, source });
                }
            };
            summary.pages_fetched += 1;

            if users.is_empty() {
                info!(total_pages = page - 1, "No more users to process");
                break;
            }

            writeln!(out, "📄 Page {}, {} users found", page, users.len())?;
            summary.users_seen += users.len();

            for user in &users {
                if !Self::is_target(user) {
                    continue;
                }
                summary.users_matched += 1;

                // is_target guarantees an email
                let email = user.email.as_deref().unwrap_or_default();
                writeln!(out, "🔄 Setting password for: {}", email)?;

                match self.reset_user(user).await {
                    UpdateOutcome::Confirmed => {
                        writeln!(out, "✅ Password set for {}", email)?;
                        summary.users_updated += 1;
                    }
                    UpdateOutcome::Failed(response) => {
                        writeln!(out, "❌ Failed for {}, response: {}", email, response)?;
                        summary.users_failed += 1;
                    }
                }
            }

            page += 1;
        }

        writeln!(out)?;
        writeln!(
            out,
            "🎉 Done! {} passwords set for {}.",
            summary.users_updated, EMAIL_SUFFIX
        )?;

        info!(
            pages = summary.pages_fetched,
            matched = summary.users_matched,
            updated = summary.users_updated,
            failed = summary.users_failed,
            "Password reset completed"
        );

        Ok(summary)
    }

    /// Issues the update for one user. Never retries.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn reset_user(&self, user: &AuthUser) -> UpdateOutcome {
        let attributes = UserAttributes::password(NEW_PASSWORD);

        match self.client.update_user_by_id(&user.id, &attributes).await {
            Ok(response) if response.has_user() => {
                debug!("Password update confirmed");
                UpdateOutcome::Confirmed
            }
            Ok(response) => {
                warn!(body = response.raw.as_str(), "Password update not confirmed");
                UpdateOutcome::Failed(response.raw)
            }
            Err(err) => {
                warn!(error = %err, "Password update failed");
                UpdateOutcome::Failed(err.to_string())
            }
        }
    }
}
