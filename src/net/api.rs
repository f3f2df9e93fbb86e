//! Authenticated request gateway for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every dashboard data call goes through [`ApiClient::request`], which reads
//! the credential from the session at call time and attaches it as a bearer
//! token. Views never touch the credential or its storage.
//!
//! ERROR HANDLING
//! ==============
//! A `401` on a call that carried a credential expires that credential in the
//! session and surfaces as [`ApiError::SessionExpired`]; the navigation guard
//! then reroutes to login on its next evaluation. Every other status is
//! returned to the caller untouched.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use log::{debug, warn};

use super::error::{ApiError, AuthError};
use super::http::{
    self, ApiRequest, ApiResponse, AUTHORIZATION, CONTENT_TYPE, JSON_CONTENT_TYPE, Payload, RequestBody,
    RequestOptions, Transport,
};
use super::types::{LoginGrant, LoginRequest};
use crate::config::ClientConfig;

/// Backend login endpoint.
pub const LOGIN_ENDPOINT: &str = "/api/auth/login";

const UNAUTHORIZED: u16 = 401;

/// The gateway's view of the session: a credential snapshot, and a way to
/// drop that credential once the backend refuses it.
pub trait CredentialSource {
    /// Current credential, read fresh on every call.
    fn credential(&self) -> Option<String>;

    /// Clear the session if it still holds `stale`.
    fn expire(&self, stale: &str);
}

#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Exchange username/password for a credential via `POST /api/auth/login`.
    ///
    /// # Errors
    ///
    /// [`AuthError::Rejected`] for any non-2xx status, [`AuthError::Network`]
    /// if the request never completed, [`AuthError::MalformedResponse`] if the
    /// body lacks a usable token or user.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginGrant, AuthError> {
        let options = RequestOptions::post().json(&LoginRequest { username, password })?;
        let request = build_request(&self.config, None, LOGIN_ENDPOINT, options)?;
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(AuthError::Rejected { status: response.status });
        }
        let grant: LoginGrant = response.json()?;
        if grant.token.is_empty() {
            return Err(AuthError::MalformedResponse("empty token".to_owned()));
        }
        Ok(grant)
    }

    /// Send an authenticated request to `path`.
    ///
    /// # Errors
    ///
    /// [`ApiError::SessionExpired`] when the backend refuses the credential,
    /// [`ApiError::Encode`]/[`ApiError::Network`] when the call cannot be made.
    pub async fn request<C>(&self, session: &C, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError>
    where
        C: CredentialSource + ?Sized,
    {
        let credential = session.credential();
        let method = options.method;
        let request = build_request(&self.config, credential.as_deref(), path, options)?;
        debug!("{} {} (authenticated: {})", method.as_str(), request.url, credential.is_some());

        let response = self.transport.send(request).await?;
        if response.status == UNAUTHORIZED {
            if let Some(stale) = credential.as_deref() {
                warn!("credential refused on {path}; expiring session");
                session.expire(stale);
                return Err(ApiError::SessionExpired);
            }
        }
        Ok(response)
    }

    /// `GET` `path` and decode a 2xx JSON body.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::request`], plus [`ApiError::Status`] for non-2xx and
    /// [`ApiError::Decode`] for a body that does not match `R`.
    pub async fn get_json<R, C>(&self, session: &C, path: &str) -> Result<R, ApiError>
    where
        R: serde::de::DeserializeOwned,
        C: CredentialSource + ?Sized,
    {
        let response = self.request(session, path, RequestOptions::get()).await?;
        if !response.ok() {
            return Err(ApiError::Status(response.status));
        }
        response.json()
    }
}

/// Resolve `options` into the request that goes on the wire.
///
/// Caller headers are kept, except `Authorization`, which always comes from
/// `credential` (and is omitted entirely without one). Structured bodies are
/// JSON-encoded with a JSON content type; text/form payloads pass through.
///
/// # Errors
///
/// Returns [`ApiError::Encode`] if a structured body cannot be serialized.
pub fn build_request(
    config: &ClientConfig,
    credential: Option<&str>,
    path: &str,
    options: RequestOptions,
) -> Result<ApiRequest, ApiError> {
    let RequestOptions { method, mut headers, body } = options;

    http::remove_header(&mut headers, AUTHORIZATION);
    if let Some(token) = credential.filter(|t| !t.is_empty()) {
        headers.push((AUTHORIZATION.to_owned(), bearer(token)));
    }

    let body = match body {
        None => None,
        Some(RequestBody::Json(value)) => {
            http::set_header(&mut headers, CONTENT_TYPE, JSON_CONTENT_TYPE);
            Some(Payload::Text(serde_json::to_string(&value)?))
        }
        Some(RequestBody::Text(text)) => Some(Payload::Text(text)),
        Some(RequestBody::Form(fields)) => Some(Payload::Form(fields)),
    };

    Ok(ApiRequest { method, url: config.endpoint(path), headers, body })
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
