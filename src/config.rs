//! Client configuration resolved at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bundle is static, so the backend base URL is baked in when the crate is
//! compiled (`BLASTWATCH_API_BASE`). An unset or blank value means the API is
//! served from the same origin as the client.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin (and optional prefix) without a trailing `/`.
    pub api_base: String,
}

impl ClientConfig {
    /// Build a config from an explicit base URL.
    pub fn new(api_base: &str) -> Self {
        Self { api_base: normalize_base(api_base) }
    }

    /// Build a config from `BLASTWATCH_API_BASE` captured at compile time.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("BLASTWATCH_API_BASE").unwrap_or_default())
    }

    /// Absolute URL for a backend path such as `/api/auth/login`.
    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.api_base)
    }
}

fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}
