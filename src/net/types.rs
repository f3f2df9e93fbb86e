//! Wire DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! `Identity` keeps every field the backend sends (`extra`) so the persisted
//! copy round-trips losslessly; the client itself only interprets
//! `username` and `role`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The logged-in user as returned by `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Backend user identifier; numeric or string depending on deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    /// Login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Access role (e.g. `"admin"`, `"customer"`), if the backend assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Any other profile fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Identity {
    /// Human-facing label: username, then id, then empty.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.username.as_deref().filter(|n| !n.is_empty()) {
            return name.to_owned();
        }
        match &self.id {
            Some(serde_json::Value::String(id)) => id.clone(),
            Some(serde_json::Value::Number(id)) => id.to_string(),
            _ => String::new(),
        }
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful login exchange: credential and identity, always installed together.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginGrant {
    pub token: String,
    pub user: Identity,
}

/// Machine status summary shown on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MachineStatus {
    /// One of `operating`, `standby`, `abnormal`, `offline`.
    pub status: String,
    /// Batch currently running, if any.
    #[serde(default)]
    pub batch_id: Option<String>,
}
