//! Client-side navigation policy.
//!
//! SYSTEM CONTEXT
//! ==============
//! `table` declares every navigable path with its view and access policy;
//! `guard` turns (route policy, session) into allow/redirect before a view
//! renders. `components::guarded_outlet` wires both into the router.

pub mod guard;
pub mod table;
