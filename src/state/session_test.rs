use leptos::prelude::*;
use serde_json::json;

use super::*;
use crate::config::ClientConfig;
use crate::net::error::ApiError;
use crate::net::http::RequestOptions;
use crate::test_support::{FakeTransport, block_on, grant_body};
use crate::util::storage::MemoryStorage;

fn api(transport: FakeTransport) -> ApiClient<FakeTransport> {
    ApiClient::new(ClientConfig::new(""), transport)
}

fn grant(token: &str, role: &str) -> LoginGrant {
    serde_json::from_str(&grant_body(token, role)).unwrap()
}

fn logged_in(storage: MemoryStorage, token: &str, role: &str) -> SessionStore<MemoryStorage> {
    let mut store = SessionStore::restore(storage);
    store.install(grant(token, role));
    store
}

// =============================================================
// restore
// =============================================================

#[test]
fn empty_storage_restores_logged_out() {
    let store = SessionStore::restore(MemoryStorage::new());
    assert!(!store.is_logged_in());
    assert_eq!(store.current_role(), None);
    assert!(store.identity().is_none());
}

#[test]
fn persisted_session_survives_reload() {
    let storage = MemoryStorage::new();
    let _ = logged_in(storage.clone(), "abc123", "admin");

    let reloaded = SessionStore::restore(storage);
    assert!(reloaded.is_logged_in());
    assert_eq!(reloaded.credential(), Some("abc123"));
    assert_eq!(reloaded.current_role(), Some("admin"));
}

#[test]
fn corrupt_identity_restores_as_no_session() {
    let storage = MemoryStorage::with_entries(&[(TOKEN_SLOT, "abc123"), (USER_SLOT, "{not json")]);
    let store = SessionStore::restore(storage.clone());
    assert!(!store.is_logged_in());
    assert_eq!(store.current_role(), None);
    assert!(storage.is_empty());
}

#[test]
fn identity_without_credential_restores_as_no_session() {
    let storage = MemoryStorage::with_entries(&[(USER_SLOT, "{\"username\":\"op\",\"role\":\"admin\"}")]);
    let store = SessionStore::restore(storage.clone());
    assert!(!store.is_logged_in());
    assert!(store.identity().is_none());
    assert!(storage.is_empty());
}

#[test]
fn credential_without_identity_restores_as_no_session() {
    for user in [None, Some("null")] {
        let mut entries = vec![(TOKEN_SLOT, "abc123")];
        if let Some(user) = user {
            entries.push((USER_SLOT, user));
        }
        let storage = MemoryStorage::with_entries(&entries);
        let store = SessionStore::restore(storage.clone());
        assert!(!store.is_logged_in(), "user slot {user:?}");
        assert!(storage.is_empty());
    }
}

#[test]
fn empty_credential_is_not_a_session() {
    let storage = MemoryStorage::with_entries(&[(TOKEN_SLOT, ""), (USER_SLOT, "{\"role\":\"admin\"}")]);
    let store = SessionStore::restore(storage);
    assert!(!store.is_logged_in());
    assert_eq!(store.current_role(), None);
}

// =============================================================
// install / logout
// =============================================================

#[test]
fn install_writes_memory_and_storage_together() {
    let storage = MemoryStorage::new();
    let store = logged_in(storage.clone(), "abc123", "admin");

    assert!(store.is_logged_in());
    assert!(store.has_role("admin"));
    assert_eq!(storage.get(TOKEN_SLOT).as_deref(), Some("abc123"));
    let persisted: serde_json::Value = serde_json::from_str(&storage.get(USER_SLOT).unwrap()).unwrap();
    assert_eq!(persisted["role"], json!("admin"));
}

#[test]
fn install_with_failing_storage_keeps_in_memory_session() {
    let store = logged_in(MemoryStorage::read_only(), "abc123", "admin");
    assert!(store.is_logged_in());
    assert_eq!(store.current_role(), Some("admin"));
}

#[test]
fn logout_clears_memory_and_storage() {
    let storage = MemoryStorage::new();
    let mut store = logged_in(storage.clone(), "abc123", "admin");
    store.logout();

    assert!(!store.is_logged_in());
    assert_eq!(store.current_role(), None);
    assert!(storage.is_empty());
}

#[test]
fn logout_is_idempotent() {
    let storage = MemoryStorage::new();
    let mut once = logged_in(storage.clone(), "abc123", "admin");
    once.logout();
    let after_once = (once.is_logged_in(), once.credential().map(str::to_owned), once.identity().cloned());

    once.logout();
    let after_twice = (once.is_logged_in(), once.credential().map(str::to_owned), once.identity().cloned());
    assert_eq!(after_once, after_twice);
    assert!(!once.is_logged_in());

    let mut never = SessionStore::restore(MemoryStorage::new());
    never.logout();
    assert!(!never.is_logged_in());
}

#[test]
fn role_absent_when_identity_has_none() {
    let mut store = SessionStore::restore(MemoryStorage::new());
    store.install(serde_json::from_value(json!({ "token": "t", "user": { "username": "op" } })).unwrap());
    assert!(store.is_logged_in());
    assert_eq!(store.current_role(), None);
    assert!(!store.has_role("admin"));
}

// =============================================================
// login
// =============================================================

#[test]
fn successful_login_installs_returned_session() {
    let api = api(FakeTransport::default().reply(200, &grant_body("abc123", "admin")));
    let mut store = SessionStore::restore(MemoryStorage::new());

    block_on(store.login(&api, "operator", "secret")).unwrap();
    assert!(store.is_logged_in());
    assert_eq!(store.credential(), Some("abc123"));
    assert_eq!(store.current_role(), Some("admin"));
    assert!(!store.login_pending());
}

#[test]
fn rejected_login_leaves_prior_session_untouched() {
    let storage = MemoryStorage::new();
    let mut store = logged_in(storage.clone(), "old-token", "customer");
    let api = api(FakeTransport::default().reply(401, ""));

    let err = block_on(store.login(&api, "operator", "wrong")).unwrap_err();
    assert!(matches!(err, AuthError::Rejected { status: 401 }));
    assert_eq!(store.credential(), Some("old-token"));
    assert_eq!(store.current_role(), Some("customer"));
    assert_eq!(storage.get(TOKEN_SLOT).as_deref(), Some("old-token"));
    assert!(!store.login_pending());
}

#[test]
fn rejected_login_from_logged_out_stays_logged_out() {
    let api = api(FakeTransport::default().reply(500, ""));
    let mut store = SessionStore::restore(MemoryStorage::new());

    assert!(block_on(store.login(&api, "operator", "secret")).is_err());
    assert!(!store.is_logged_in());
    assert_eq!(store.current_role(), None);
}

#[test]
fn second_login_while_pending_is_refused() {
    let mut store = SessionStore::restore(MemoryStorage::new());
    store.begin_login().unwrap();
    assert!(matches!(store.begin_login(), Err(AuthError::LoginInFlight)));

    store.finish_login(Ok(grant("abc123", "admin"))).unwrap();
    assert!(!store.login_pending());
    assert!(store.begin_login().is_ok());
}

#[test]
fn failed_finish_clears_pending_flag() {
    let mut store = SessionStore::restore(MemoryStorage::new());
    store.begin_login().unwrap();
    let err = store.finish_login(Err(AuthError::Rejected { status: 403 })).unwrap_err();
    assert!(matches!(err, AuthError::Rejected { status: 403 }));
    assert!(!store.login_pending());
}

// =============================================================
// expiry + gateway integration
// =============================================================

#[test]
fn expire_only_clears_matching_credential() {
    let mut store = logged_in(MemoryStorage::new(), "new-token", "admin");
    assert!(!store.expire("old-token"));
    assert!(store.is_logged_in());

    assert!(store.expire("new-token"));
    assert!(!store.is_logged_in());
}

#[test]
fn gateway_carries_current_credential_and_drops_it_after_logout() {
    let api = api(FakeTransport::default());
    let session = RefCell::new(logged_in(MemoryStorage::new(), "abc123", "admin"));

    block_on(api.request(&session, "/api/alarms", RequestOptions::get())).unwrap();
    assert_eq!(api.transport().last().header("Authorization"), Some("Bearer abc123"));

    session.borrow_mut().logout();
    block_on(api.request(&session, "/api/alarms", RequestOptions::get())).unwrap();
    assert_eq!(api.transport().last().header("Authorization"), None);
}

#[test]
fn gateway_follows_a_replaced_session() {
    let api = api(FakeTransport::default());
    let session = RefCell::new(logged_in(MemoryStorage::new(), "first", "admin"));
    block_on(api.request(&session, "/api/alarms", RequestOptions::get())).unwrap();

    session.borrow_mut().install(grant("second", "customer"));
    block_on(api.request(&session, "/api/alarms", RequestOptions::get())).unwrap();
    assert_eq!(api.transport().last().header("Authorization"), Some("Bearer second"));
}

#[test]
fn unauthorized_response_logs_the_session_out() {
    let storage = MemoryStorage::new();
    let api = api(FakeTransport::default().reply(401, ""));
    let session = RefCell::new(logged_in(storage.clone(), "abc123", "admin"));

    let err = block_on(api.request(&session, "/api/alarms", RequestOptions::get())).unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert!(!session.borrow().is_logged_in());
    assert!(storage.is_empty());
}

// =============================================================
// reactive session (as provided to the app)
// =============================================================

fn reactive(store: SessionStore<MemoryStorage>) -> (Owner, RwSignal<SessionStore<MemoryStorage>>) {
    let owner = Owner::new();
    owner.set();
    let signal = RwSignal::new(store);
    (owner, signal)
}

#[test]
fn reactive_login_installs_grant_and_clears_pending() {
    let (_owner, session) = reactive(SessionStore::restore(MemoryStorage::new()));
    let api = api(FakeTransport::default().reply(200, &grant_body("abc123", "admin")));

    block_on(login_reactive(session, &api, "operator", "secret")).unwrap();
    session.with_untracked(|store| {
        assert_eq!(store.credential(), Some("abc123"));
        assert_eq!(store.current_role(), Some("admin"));
        assert!(!store.login_pending());
    });
}

#[test]
fn reactive_login_refused_while_one_is_pending() {
    let (_owner, session) = reactive(SessionStore::restore(MemoryStorage::new()));
    session.update(|store| store.begin_login().unwrap());
    let api = api(FakeTransport::default().reply(200, &grant_body("abc123", "admin")));

    let err = block_on(login_reactive(session, &api, "operator", "secret")).unwrap_err();
    assert!(matches!(err, AuthError::LoginInFlight));
    assert_eq!(api.transport().count(), 0);
    session.with_untracked(|store| {
        assert!(store.login_pending());
        assert!(!store.is_logged_in());
    });
}

#[test]
fn reactive_login_failure_keeps_prior_session() {
    let (_owner, session) = reactive(logged_in(MemoryStorage::new(), "old-token", "customer"));
    let api = api(FakeTransport::default().reply(401, ""));

    let err = block_on(login_reactive(session, &api, "operator", "wrong")).unwrap_err();
    assert!(matches!(err, AuthError::Rejected { status: 401 }));
    session.with_untracked(|store| {
        assert_eq!(store.credential(), Some("old-token"));
        assert!(!store.login_pending());
    });
}

#[test]
fn gateway_reads_credential_from_signal() {
    let (_owner, session) = reactive(logged_in(MemoryStorage::new(), "abc123", "admin"));
    let api = api(FakeTransport::default());

    block_on(api.request(&session, "/api/alarms", RequestOptions::get())).unwrap();
    assert_eq!(api.transport().last().header("Authorization"), Some("Bearer abc123"));

    session.update(SessionStore::logout);
    block_on(api.request(&session, "/api/alarms", RequestOptions::get())).unwrap();
    assert_eq!(api.transport().last().header("Authorization"), None);
}

#[test]
fn unauthorized_response_logs_the_signal_out() {
    let storage = MemoryStorage::new();
    let (_owner, session) = reactive(logged_in(storage.clone(), "abc123", "admin"));
    let api = api(FakeTransport::default().reply(401, ""));

    let err = block_on(api.request(&session, "/api/alarms", RequestOptions::get())).unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert!(!session.with_untracked(SessionStore::is_logged_in));
    assert!(storage.is_empty());
}
