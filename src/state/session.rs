//! Login session: credential + identity, persisted across reloads.
//!
//! SYSTEM CONTEXT
//! ==============
//! Single source of truth for "who is logged in". The navigation guard reads
//! it, the API gateway reads its credential, and only the operations here
//! write it. The app owns one instance inside an `RwSignal` provided via
//! context.
//!
//! DESIGN
//! ======
//! - Credential and identity are installed and cleared together, in memory
//!   and in storage, within one call.
//! - `restore` normalizes whatever storage holds: an identity that cannot be
//!   parsed, or a credential and identity that were not persisted together,
//!   read as "no session" and both slots are cleared.
//! - At most one login exchange is pending at a time (`begin_login` /
//!   `finish_login`); a second submit while one is in flight is refused.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;

use leptos::prelude::*;
use log::{info, warn};

use crate::net::api::{ApiClient, CredentialSource};
use crate::net::error::AuthError;
use crate::net::http::Transport;
use crate::net::types::{Identity, LoginGrant};
use crate::util::storage::SessionStorage;

/// Storage slot holding the bearer credential.
pub const TOKEN_SLOT: &str = "token";
/// Storage slot holding the JSON-serialized identity.
pub const USER_SLOT: &str = "user";

#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    credential: Option<String>,
    identity: Option<Identity>,
    login_pending: bool,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Rehydrate the session persisted in `storage`.
    pub fn restore(storage: S) -> Self {
        let credential = storage.get(TOKEN_SLOT).filter(|t| !t.is_empty());
        let identity = match storage.get(USER_SLOT) {
            None => None,
            Some(raw) => match serde_json::from_str::<Option<Identity>>(&raw) {
                Ok(identity) => identity,
                Err(e) => {
                    warn!("discarding unreadable persisted identity: {e}");
                    let mut store = Self::empty(storage);
                    store.clear();
                    return store;
                }
            },
        };

        let mut store = Self { storage, credential, identity, login_pending: false };
        if store.credential.is_some() != store.identity.is_some() {
            warn!("discarding half-persisted session");
            store.clear();
        }
        store
    }

    fn empty(storage: S) -> Self {
        Self { storage, credential: None, identity: None, login_pending: false }
    }

    pub fn is_logged_in(&self) -> bool {
        self.credential.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Role of the logged-in user; `None` when logged out or unassigned.
    pub fn current_role(&self) -> Option<&str> {
        if !self.is_logged_in() {
            return None;
        }
        self.identity.as_ref()?.role.as_deref()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.current_role() == Some(role)
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn login_pending(&self) -> bool {
        self.login_pending
    }

    /// Install a fresh credential and identity, replacing any prior session.
    pub fn install(&mut self, grant: LoginGrant) {
        let LoginGrant { token, user } = grant;
        let persisted = serde_json::to_string(&user)
            .map_err(|e| e.to_string())
            .and_then(|raw| {
                self.storage.set(TOKEN_SLOT, &token).map_err(|e| e.to_string())?;
                self.storage.set(USER_SLOT, &raw).map_err(|e| e.to_string())
            });
        if let Err(e) = persisted {
            warn!("session will not survive a reload: {e}");
            self.clear_storage();
        }

        self.credential = Some(token);
        self.identity = Some(user);
    }

    /// Clear the session. Calling it while logged out is a no-op.
    pub fn logout(&mut self) {
        if self.is_logged_in() || self.identity.is_some() {
            info!("logging out");
        }
        self.clear();
    }

    /// Clear the session if it still holds `stale`. Returns whether it did.
    ///
    /// A newer session installed after `stale` was sent is left alone.
    pub fn expire(&mut self, stale: &str) -> bool {
        if self.credential.as_deref() != Some(stale) {
            return false;
        }
        warn!("session expired");
        self.clear();
        true
    }

    /// Mark a login exchange as in flight.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::LoginInFlight`] if one is already pending.
    pub fn begin_login(&mut self) -> Result<(), AuthError> {
        if self.login_pending {
            return Err(AuthError::LoginInFlight);
        }
        self.login_pending = true;
        Ok(())
    }

    /// Complete the pending exchange. On success the grant is installed; on
    /// failure the prior session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the exchange's error unchanged.
    pub fn finish_login(&mut self, outcome: Result<LoginGrant, AuthError>) -> Result<(), AuthError> {
        self.login_pending = false;
        let grant = outcome?;
        info!("logged in as {:?}", grant.user.display_name());
        self.install(grant);
        Ok(())
    }

    /// Exchange `username`/`password` with the backend and install the result.
    ///
    /// # Errors
    ///
    /// [`AuthError::Rejected`] for refused credentials; see [`ApiClient::login`].
    pub async fn login<T: Transport>(
        &mut self,
        api: &ApiClient<T>,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        self.begin_login()?;
        let outcome = api.login(username, password).await;
        self.finish_login(outcome)
    }

    fn clear(&mut self) {
        self.credential = None;
        self.identity = None;
        self.clear_storage();
    }

    fn clear_storage(&self) {
        for slot in [TOKEN_SLOT, USER_SLOT] {
            if let Err(e) = self.storage.remove(slot) {
                warn!("could not clear {slot}: {e}");
            }
        }
    }
}

/// Reactive login: the signal is only borrowed around the exchange, never
/// across it, so the UI stays responsive while the request is in flight.
///
/// # Errors
///
/// [`AuthError::LoginInFlight`] if another login is pending, otherwise as
/// [`ApiClient::login`].
pub async fn login_reactive<S, T>(
    session: RwSignal<SessionStore<S>>,
    api: &ApiClient<T>,
    username: &str,
    password: &str,
) -> Result<(), AuthError>
where
    S: SessionStorage + Send + Sync + 'static,
    T: Transport,
{
    session
        .try_update(SessionStore::begin_login)
        .unwrap_or(Err(AuthError::LoginInFlight))?;
    let outcome = api.login(username, password).await;
    session
        .try_update(|store| store.finish_login(outcome))
        .unwrap_or_else(|| Err(AuthError::Network("session disposed".to_owned())))
}

impl<S: SessionStorage> CredentialSource for RefCell<SessionStore<S>> {
    fn credential(&self) -> Option<String> {
        self.borrow().credential().map(str::to_owned)
    }

    fn expire(&self, stale: &str) {
        self.borrow_mut().expire(stale);
    }
}

impl<S> CredentialSource for RwSignal<SessionStore<S>>
where
    S: SessionStorage + Send + Sync + 'static,
{
    fn credential(&self) -> Option<String> {
        self.try_with_untracked(|store| store.credential().map(str::to_owned))
            .flatten()
    }

    fn expire(&self, stale: &str) {
        let _ = self.try_update(|store| store.expire(stale));
    }
}
