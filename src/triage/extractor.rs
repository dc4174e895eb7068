//! Pattern-based extraction of contact details and request types.
//!
//! Pure string matching, no model calls. Absence of a match omits the
//! field; extraction never fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::triage::lexicon::RequestTrigger;
use crate::triage::types::{ExtractedInfo, RequestType};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b").unwrap()
});

// Separators are optional, so a bare ten-digit run also matches.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").unwrap());

/// Pulls structured fields out of an email body.
#[derive(Debug, Clone, Copy)]
pub struct Extractor {
    request_triggers: &'static [RequestTrigger],
}

impl Extractor {
    pub fn new(request_triggers: &'static [RequestTrigger]) -> Self {
        Self { request_triggers }
    }

    /// Extract contact emails, phone numbers, and the first matching request type.
    pub fn extract(&self, body: &str) -> ExtractedInfo {
        ExtractedInfo {
            contact_emails: find_all(&EMAIL_RE, body),
            phone_numbers: find_all(&PHONE_RE, body),
            request_type: self.request_type(body),
        }
    }

    /// First trigger (in table order) contained in the lowercased body.
    pub fn request_type(&self, body: &str) -> Option<RequestType> {
        let lower = body.to_lowercase();
        self.request_triggers
            .iter()
            .find(|trigger| lower.contains(trigger.phrase))
            .map(|trigger| trigger.request_type)
    }
}

/// All non-overlapping matches, left to right. Duplicates are kept.
fn find_all(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}
