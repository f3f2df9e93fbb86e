//! Shared client-side state.
//!
//! DESIGN
//! ======
//! Only the login session lives here; page-local state stays in the pages.

pub mod session;
