//! Static keyword tables for triage.
//!
//! Every lookup is a substring containment test against lowercased text, so
//! all entries here must be lowercase. Two profiles exist:
//! - `Extended`: the broad rule set used alongside the model-backed
//!   sentiment strategy (adds verify/invoice/code/development and the Pricing
//!   group, plus a longer urgent/critical vocabulary)
//! - `Compact`: the heuristic rule set with the short keyword lists
//!
//! Polarity words and request triggers are shared by both profiles.

use crate::triage::types::{Category, RequestType};

/// Keyword group for one category. Groups are evaluated in table order.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

/// Trigger phrase for a request type. Triggers are evaluated in table order.
#[derive(Debug, Clone, Copy)]
pub struct RequestTrigger {
    pub phrase: &'static str,
    pub request_type: RequestType,
}

/// A complete set of keyword tables.
#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    pub urgent_keywords: &'static [&'static str],
    pub critical_keywords: &'static [&'static str],
    pub positive_words: &'static [&'static str],
    pub negative_words: &'static [&'static str],
    pub categories: &'static [CategoryRule],
    pub request_triggers: &'static [RequestTrigger],
}

/// Which rule set to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LexiconProfile {
    #[default]
    Extended,
    Compact,
}

impl LexiconProfile {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "extended" => Some(Self::Extended),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

const POSITIVE_WORDS: &[&str] = &[
    "thank",
    "great",
    "excellent",
    "good",
    "happy",
    "satisfied",
    "love",
    "perfect",
    "amazing",
    "wonderful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "problem",
    "issue",
    "error",
    "failed",
    "broken",
    "not working",
    "frustrated",
    "angry",
    "disappointed",
    "urgent",
    "critical",
];

// "reset password" is checked before "refund", which is checked before "cancel".
const REQUEST_TRIGGERS: &[RequestTrigger] = &[
    RequestTrigger {
        phrase: "reset password",
        request_type: RequestType::PasswordReset,
    },
    RequestTrigger {
        phrase: "refund",
        request_type: RequestType::RefundRequest,
    },
    RequestTrigger {
        phrase: "cancel",
        request_type: RequestType::Cancellation,
    },
];

static EXTENDED: Lexicon = Lexicon {
    urgent_keywords: &[
        "urgent",
        "critical",
        "immediate",
        "asap",
        "emergency",
        "blocked",
        "down",
        "cannot access",
        "not working",
        "broken",
        "failed",
        "error",
        "issue",
        "problem",
    ],
    critical_keywords: &[
        "critical",
        "emergency",
        "down",
        "outage",
        "severe",
        "major issue",
        "completely broken",
        "not working at all",
    ],
    positive_words: POSITIVE_WORDS,
    negative_words: NEGATIVE_WORDS,
    categories: &[
        CategoryRule {
            category: Category::AccountAccess,
            keywords: &["login", "password", "account", "access", "verify"],
        },
        CategoryRule {
            category: Category::Billing,
            keywords: &["billing", "charge", "payment", "refund", "invoice"],
        },
        CategoryRule {
            category: Category::TechnicalSupport,
            keywords: &["api", "integration", "technical", "code", "development"],
        },
        CategoryRule {
            category: Category::Pricing,
            keywords: &["pricing", "plan", "subscription", "upgrade"],
        },
    ],
    request_triggers: REQUEST_TRIGGERS,
};

static COMPACT: Lexicon = Lexicon {
    urgent_keywords: &[
        "urgent",
        "critical",
        "immediate",
        "asap",
        "emergency",
        "blocked",
        "down",
        "cannot access",
        "not working",
        "broken",
    ],
    critical_keywords: &["critical", "emergency", "down"],
    positive_words: POSITIVE_WORDS,
    negative_words: NEGATIVE_WORDS,
    categories: &[
        CategoryRule {
            category: Category::AccountAccess,
            keywords: &["login", "password", "account", "access"],
        },
        CategoryRule {
            category: Category::Billing,
            keywords: &["billing", "charge", "payment", "refund"],
        },
        CategoryRule {
            category: Category::TechnicalSupport,
            keywords: &["api", "technical", "integration"],
        },
    ],
    request_triggers: REQUEST_TRIGGERS,
};

impl Lexicon {
    /// Process-wide tables for a profile. Read-only for the life of the process.
    pub fn for_profile(profile: LexiconProfile) -> &'static Lexicon {
        match profile {
            LexiconProfile::Extended => &EXTENDED,
            LexiconProfile::Compact => &COMPACT,
        }
    }
}

/// True if any phrase occurs in `text`. `text` must already be lowercase.
pub fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| text.contains(phrase))
}

/// Number of distinct phrases that occur in `text` (each phrase counts once).
pub fn count_present(text: &str, phrases: &[&str]) -> usize {
    phrases.iter().filter(|phrase| text.contains(*phrase)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_phrases(lexicon: &Lexicon) -> Vec<&'static str> {
        let mut phrases = Vec::new();
        phrases.extend_from_slice(lexicon.urgent_keywords);
        phrases.extend_from_slice(lexicon.critical_keywords);
        phrases.extend_from_slice(lexicon.positive_words);
        phrases.extend_from_slice(lexicon.negative_words);
        for rule in lexicon.categories {
            phrases.extend_from_slice(rule.keywords);
        }
        phrases.extend(lexicon.request_triggers.iter().map(|t| t.phrase));
        phrases
    }

    #[test]
    fn every_table_is_non_empty() {
        for profile in [LexiconProfile::Extended, LexiconProfile::Compact] {
            let lexicon = Lexicon::for_profile(profile);
            assert!(!lexicon.urgent_keywords.is_empty());
            assert!(!lexicon.critical_keywords.is_empty());
            assert!(!lexicon.positive_words.is_empty());
            assert!(!lexicon.negative_words.is_empty());
            assert!(!lexicon.request_triggers.is_empty());
            assert!(lexicon.categories.iter().all(|rule| !rule.keywords.is_empty()));
        }
    }

    #[test]
    fn every_phrase_is_lowercase() {
        for profile in [LexiconProfile::Extended, LexiconProfile::Compact] {
            for phrase in all_phrases(Lexicon::for_profile(profile)) {
                assert_eq!(phrase, phrase.to_lowercase(), "phrase {phrase:?} not lowercase");
            }
        }
    }

    #[test]
    fn category_order_is_fixed() {
        let order: Vec<Category> = Lexicon::for_profile(LexiconProfile::Extended)
            .categories
            .iter()
            .map(|rule| rule.category)
            .collect();
        assert_eq!(
            order,
            vec![
                Category::AccountAccess,
                Category::Billing,
                Category::TechnicalSupport,
                Category::Pricing,
            ]
        );
    }

    #[test]
    fn compact_profile_has_no_pricing_group() {
        let compact = Lexicon::for_profile(LexiconProfile::Compact);
        assert!(compact.categories.iter().all(|r| r.category != Category::Pricing));
    }

    #[test]
    fn profile_parse() {
        assert_eq!(LexiconProfile::parse("Extended"), Some(LexiconProfile::Extended));
        assert_eq!(LexiconProfile::parse(" compact "), Some(LexiconProfile::Compact));
        assert_eq!(LexiconProfile::parse("full"), None);
    }

    #[test]
    fn count_present_counts_each_phrase_once() {
        assert_eq!(count_present("error error error", &["error", "broken"]), 1);
        assert_eq!(count_present("", &["error"]), 0);
        assert!(contains_any("it is down again", &["down"]));
        assert!(!contains_any("", &["down"]));
    }
}
