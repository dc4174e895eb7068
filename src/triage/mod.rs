//! Support email triage engine.
//!
//! Every email flows through:
//! 1. `Classifier::classify()`: sentiment, priority, category from keyword tables
//!    (sentiment optionally from an external provider)
//! 2. `Extractor::extract()`: contact emails, phone numbers, request type
//! 3. `Composer::compose()`: templated reply, on a separate call
//!
//! `quick_reply` is a separate one-line acknowledgement keyed by email type.
//!
//! `TriageEngine` is the facade the transport layer calls. Keyword tables and
//! the knowledge base are process-wide statics, read-only after first use.

pub mod classifier;
pub mod composer;
pub mod engine;
pub mod extractor;
pub mod knowledge;
pub mod lexicon;
pub mod quick_reply;
pub mod sentiment;
pub mod types;

pub use engine::TriageEngine;
