//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, translation
//! tables) from session, navigation and page logic.

pub mod i18n;
pub mod storage;
