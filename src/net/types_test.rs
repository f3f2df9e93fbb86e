use super::*;
use serde_json::json;

#[test]
fn login_grant_parses_token_and_role() {
    let grant: LoginGrant = serde_json::from_value(json!({
        "token": "abc123",
        "user": { "id": 7, "username": "op1", "role": "admin" }
    }))
    .unwrap();
    assert_eq!(grant.token, "abc123");
    assert_eq!(grant.user.role.as_deref(), Some("admin"));
    assert_eq!(grant.user.id, Some(json!(7)));
}

#[test]
fn identity_preserves_unknown_fields() {
    let raw = json!({ "username": "op1", "role": "customer", "plant": "Line 3" });
    let identity: Identity = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(identity.extra.get("plant"), Some(&json!("Line 3")));
    assert_eq!(serde_json::to_value(&identity).unwrap(), raw);
}

#[test]
fn identity_without_role_is_accepted() {
    let identity: Identity = serde_json::from_value(json!({ "username": "guest" })).unwrap();
    assert!(identity.role.is_none());
}

#[test]
fn display_name_prefers_username_then_id() {
    let identity: Identity = serde_json::from_value(json!({ "username": "op1", "id": 3 })).unwrap();
    assert_eq!(identity.display_name(), "op1");

    let identity: Identity = serde_json::from_value(json!({ "id": 3 })).unwrap();
    assert_eq!(identity.display_name(), "3");

    let identity: Identity = serde_json::from_value(json!({ "id": "u-9", "username": "" })).unwrap();
    assert_eq!(identity.display_name(), "u-9");
}

#[test]
fn login_request_serializes_expected_fields() {
    let body = serde_json::to_value(LoginRequest { username: "op1", password: "pw" }).unwrap();
    assert_eq!(body, json!({ "username": "op1", "password": "pw" }));
}

#[test]
fn machine_status_batch_is_optional() {
    let status: MachineStatus = serde_json::from_value(json!({ "status": "standby" })).unwrap();
    assert_eq!(status.status, "standby");
    assert!(status.batch_id.is_none());
}
