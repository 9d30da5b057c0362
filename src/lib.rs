//! Back-office core for a moving company: lead capture, three-tier quoting,
//! dispatch, crew and payroll records, and receipt tracking.
//!
//! The presentation layer drives everything through [`domain::AppState`] and
//! [`domain::price_quote`], restoring a [`domain::PersistedState`] snapshot at
//! startup and saving one at shutdown.

pub mod domain;
pub mod util;
