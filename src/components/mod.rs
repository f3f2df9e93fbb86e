//! Reusable UI components.
//!
//! ARCHITECTURE
//! ============
//! `guarded_outlet` is the only component with policy in it; the rest are
//! presentation.

pub mod data_panel;
pub mod guarded_outlet;
pub mod nav_bar;
