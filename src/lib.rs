//! Support Triage: keyword triage and templated replies for support email.

pub mod config;
pub mod error;
pub mod server;
pub mod triage;
