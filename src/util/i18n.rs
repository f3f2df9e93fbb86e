//! Translation lookup for page and component text.
//!
//! Tables live in `locales/*.json` and are embedded at compile time. Keys are
//! dotted paths (`"status.operating"`); a miss returns the key itself so a
//! missing translation is visible but never fatal. `{{ name }}` placeholders
//! are filled from the supplied variables and left as-is when unsupplied.

#[cfg(test)]
#[path = "i18n_test.rs"]
mod i18n_test;

use std::sync::LazyLock;

use serde_json::Value;

use super::storage::SessionStorage;

/// Storage slot for the chosen language.
pub const LANG_SLOT: &str = "lang";

static EN: LazyLock<Value> = LazyLock::new(|| parse_table(include_str!("../../locales/en.json")));
static ZH: LazyLock<Value> = LazyLock::new(|| parse_table(include_str!("../../locales/zh.json")));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Zh,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "en" => Some(Self::En),
            "zh" => Some(Self::Zh),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Zh,
            Self::Zh => Self::En,
        }
    }

    /// Persisted language, English when unset or unrecognized.
    pub fn load(storage: &impl SessionStorage) -> Self {
        storage
            .get(LANG_SLOT)
            .and_then(|code| Self::from_code(&code))
            .unwrap_or_default()
    }

    pub fn save(self, storage: &impl SessionStorage) {
        if let Err(e) = storage.set(LANG_SLOT, self.code()) {
            log::warn!("language preference not saved: {e}");
        }
    }

    fn table(self) -> &'static Value {
        match self {
            Self::En => &*EN,
            Self::Zh => &*ZH,
        }
    }
}

fn parse_table(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::error!("translation table unreadable: {e}");
        Value::Null
    })
}

/// Translate `key` for `lang`, substituting `{{var}}` placeholders.
pub fn translate(lang: Lang, key: &str, vars: &[(&str, &str)]) -> String {
    match lookup(lang.table(), key) {
        Some(template) => interpolate(template, vars),
        None => key.to_owned(),
    }
}

/// Translate a machine status code (`operating`, `standby`, ...).
pub fn translate_status(lang: Lang, status: &str) -> String {
    translate(lang, &format!("status.{status}"), &[])
}

fn lookup<'a>(table: &'a Value, key: &str) -> Option<&'a str> {
    key.split('.')
        .try_fold(table, |node, part| node.as_object()?.get(part))?
        .as_str()
}

fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        let Some(len) = rest[open + 2..].find("}}") else {
            break;
        };
        let close = open + 2 + len + 2;
        let name = rest[open + 2..open + 2 + len].trim();
        out.push_str(&rest[..open]);
        match vars.iter().find(|(var, _)| *var == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..close]),
        }
        rest = &rest[close..];
    }
    out.push_str(rest);
    out
}
