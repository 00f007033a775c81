//! RemoteStore - reqwest client for the hosted backend service.
//!
//! Wraps the service's auth endpoints (`/auth/v1`) and table endpoints
//! (`/rest/v1/{table}`). Every call is a single request with no retry;
//! the client's own network defaults govern timeouts. Non-success
//! statuses are decoded from the service's error body and folded into
//! `TandemError`.

use super::query::Query;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tandem_core::auth::AuthChange;
use tandem_core::config::RemoteConfig;
use tandem_core::error::{Result, TandemError};
use tandem_core::user::Principal;
use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

const AUTH_CHANGE_CAPACITY: usize = 16;

/// Thin client over the remote store's auth and table primitives.
///
/// Holds the current token pair behind a lock and publishes out-of-band
/// auth-state changes (silent refresh, expiry) on a broadcast channel.
/// Explicit sign-in/sign-up/sign-out results are returned to the caller
/// and are not republished as changes.
pub struct RemoteStore {
    http: Client,
    base_url: String,
    api_key: String,
    session: RwLock<Option<AuthSession>>,
    changes: broadcast::Sender<AuthChange>,
}

#[derive(Debug, Clone)]
struct AuthSession {
    access_token: String,
    refresh_token: Option<String>,
    principal: Principal,
}

impl RemoteStore {
    /// Creates a client for the configured endpoint.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        config.validate()?;
        let (changes, _) = broadcast::channel(AUTH_CHANGE_CAPACITY);
        Ok(Self {
            http: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            session: RwLock::new(None),
            changes,
        })
    }

    // ========================================================================
    // Auth primitives
    // ========================================================================

    /// Exchanges email/password for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Principal> {
        let response = self
            .send(
                self.http
                    .post(self.auth_url("token?grant_type=password"))
                    .json(&PasswordGrant { email, password }),
                false,
            )
            .await?;
        let token: TokenResponse = decode(response).await?;
        Ok(self.store_session(token).await)
    }

    /// Creates a new auth account.
    ///
    /// The service is configured without email confirmation, so the
    /// response carries the same token payload as a sign-in and the new
    /// principal's session is usable immediately (the profile write that
    /// follows sign-up depends on this).
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Principal> {
        let response = self
            .send(
                self.http
                    .post(self.auth_url("signup"))
                    .json(&PasswordGrant { email, password }),
                false,
            )
            .await?;
        let token: TokenResponse = decode(response).await?;
        Ok(self.store_session(token).await)
    }

    /// Ends the current session on the remote side and drops the tokens.
    ///
    /// A failed logout keeps the tokens so the caller can retry.
    pub async fn sign_out(&self) -> Result<()> {
        if self.session.read().await.is_none() {
            return Ok(());
        }
        self.send(self.http.post(self.auth_url("logout")), true)
            .await?;
        *self.session.write().await = None;
        Ok(())
    }

    /// The principal of the current session, if any.
    pub async fn current_principal(&self) -> Option<Principal> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.principal.clone())
    }

    /// Triggers the remote password-reset email flow.
    pub async fn request_password_reset(&self, email: &str) -> Result<()> {
        self.send(
            self.http
                .post(self.auth_url("recover"))
                .json(&RecoverRequest { email }),
            false,
        )
        .await?;
        Ok(())
    }

    /// Exchanges the refresh token for a new session.
    ///
    /// Publishes `SignedIn` on success. A failed refresh ends the
    /// session and publishes `SignedOut`.
    pub async fn refresh_session(&self) -> Result<Principal> {
        let refresh_token = {
            let session = self.session.read().await;
            session.as_ref().and_then(|s| s.refresh_token.clone())
        };
        let Some(refresh_token) = refresh_token else {
            self.expire_session().await;
            return Err(TandemError::auth("no session to refresh"));
        };

        let result = self
            .send(
                self.http
                    .post(self.auth_url("token?grant_type=refresh_token"))
                    .json(&RefreshGrant {
                        refresh_token: &refresh_token,
                    }),
                false,
            )
            .await;

        match result {
            Ok(response) => {
                let token: TokenResponse = decode(response).await?;
                let principal = self.store_session(token).await;
                self.publish(AuthChange::SignedIn {
                    principal: principal.clone(),
                });
                Ok(principal)
            }
            Err(err) => {
                tracing::warn!("session refresh failed: {err}");
                self.expire_session().await;
                Err(err)
            }
        }
    }

    /// Subscribes to out-of-band auth-state changes.
    pub fn subscribe_changes(&self) -> broadcast::Receiver<AuthChange> {
        self.changes.subscribe()
    }

    // ========================================================================
    // Table primitives
    // ========================================================================

    /// Selects rows matching the query.
    pub async fn select<T: DeserializeOwned>(&self, query: Query) -> Result<Vec<T>> {
        let response = self
            .send(
                self.http
                    .get(self.rest_url(query.table_name()))
                    .query(query.params()),
                true,
            )
            .await?;
        decode(response).await
    }

    /// Selects at most one row matching the query.
    pub async fn select_first<T: DeserializeOwned>(&self, query: Query) -> Result<Option<T>> {
        let mut rows = self.select::<T>(query.limit(1)).await?;
        Ok(rows.pop())
    }

    /// Inserts a row and returns the created representation.
    pub async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<T> {
        let response = self
            .send(
                self.http
                    .post(self.rest_url(table))
                    .header("Prefer", "return=representation")
                    .json(row),
                true,
            )
            .await?;
        let mut created: Vec<T> = decode(response).await?;
        created.pop().ok_or_else(|| {
            TandemError::internal(format!("empty representation returned for insert into {table}"))
        })
    }

    /// Creates or overwrites a row keyed by its primary key.
    pub async fn upsert<B: Serialize>(&self, table: &str, row: &B) -> Result<()> {
        self.send(
            self.http
                .post(self.rest_url(table))
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(row),
            true,
        )
        .await?;
        Ok(())
    }

    /// Patches rows matching the query predicates.
    ///
    /// Returns the number of affected rows; ownership scoping travels in
    /// the predicates, so zero means the caller's scope matched nothing.
    pub async fn update<B: Serialize>(&self, query: Query, patch: &B) -> Result<u64> {
        let response = self
            .send(
                self.http
                    .patch(self.rest_url(query.table_name()))
                    .query(query.params())
                    .header("Prefer", "return=representation")
                    .json(patch),
                true,
            )
            .await?;
        let affected: Vec<serde_json::Value> = decode(response).await?;
        Ok(affected.len() as u64)
    }

    /// Deletes rows matching the query predicates; returns the affected count.
    pub async fn delete(&self, query: Query) -> Result<u64> {
        let response = self
            .send(
                self.http
                    .delete(self.rest_url(query.table_name()))
                    .query(query.params())
                    .header("Prefer", "return=representation"),
                true,
            )
            .await?;
        let affected: Vec<serde_json::Value> = decode(response).await?;
        Ok(affected.len() as u64)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        with_bearer: bool,
    ) -> Result<reqwest::Response> {
        let mut builder = builder.header("apikey", &self.api_key);
        let mut bearer_attached = false;
        if with_bearer {
            if let Some(session) = self.session.read().await.as_ref() {
                builder = builder.bearer_auth(&session.access_token);
                bearer_attached = true;
            }
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "failed to read remote error body".to_string());
        let err = map_http_error(status, &body);
        tracing::debug!(%status, "remote call failed: {err}");

        // A rejected bearer means the session expired out from under us.
        if bearer_attached && status == StatusCode::UNAUTHORIZED {
            self.expire_session().await;
        }

        Err(err)
    }

    async fn store_session(&self, token: TokenResponse) -> Principal {
        let principal = Principal::from(token.user);
        *self.session.write().await = Some(AuthSession {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            principal: principal.clone(),
        });
        principal
    }

    async fn expire_session(&self) {
        let had_session = self.session.write().await.take().is_some();
        if had_session {
            self.publish(AuthChange::SignedOut);
        }
    }

    fn publish(&self, change: AuthChange) {
        // No subscribers is fine; the change is simply unobserved.
        let _ = self.changes.send(change);
    }
}

// ============================================================================
// Wire shapes
// ============================================================================

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct RecoverRequest<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    user: UserRow,
}

#[derive(Deserialize)]
struct UserRow {
    id: Uuid,
    email: String,
}

impl From<UserRow> for Principal {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
        }
    }
}

/// Error body shapes the auth and table endpoints produce.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    response.json().await.map_err(|err| TandemError::Serialization {
        format: "JSON".to_string(),
        message: format!("failed to parse remote response: {err}"),
    })
}

fn map_transport_error(err: reqwest::Error) -> TandemError {
    if err.is_timeout() {
        TandemError::network(format!("remote call timed out: {err}"))
    } else if err.is_connect() {
        TandemError::network(format!("remote unreachable: {err}"))
    } else {
        TandemError::network(err.to_string())
    }
}

fn map_http_error(status: StatusCode, body: &str) -> TandemError {
    let message = parse_error_message(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TandemError::unauthorized(message),
        _ => TandemError::remote(Some(status.as_u16()), message),
    }
}

fn parse_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.message.or(e.msg).or(e.error_description))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "remote service error".to_string()
            } else {
                trimmed.to_string()
            }
        })
}
