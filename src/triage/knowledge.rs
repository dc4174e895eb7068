//! Static advisory text blocks keyed by category.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Key of the fallback block.
pub const GENERAL_KEY: &str = "general";

/// Read-only mapping from category key to advisory text.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: HashMap<&'static str, &'static str>,
}

static DEFAULT_KNOWLEDGE: LazyLock<KnowledgeBase> = LazyLock::new(|| {
    KnowledgeBase::from_entries([
        (
            "account_access",
            "For account access issues:\n\
             1. Try resetting your password using the 'Forgot Password' link\n\
             2. Clear your browser cache and cookies\n\
             3. Try accessing from an incognito/private window\n\
             4. If the issue persists, we can manually reset your account\n\
             Contact support at support@company.com for immediate assistance.",
        ),
        (
            "billing",
            "For billing inquiries:\n\
             1. You can view all charges in your account dashboard\n\
             2. Refunds are processed within 5-7 business days\n\
             3. For billing disputes, please provide transaction ID\n\
             4. You can update payment methods in your account settings\n\
             Our billing team is available at billing@company.com",
        ),
        (
            "technical_support",
            "For technical issues:\n\
             1. Check our API documentation at docs.company.com\n\
             2. Ensure you're using the latest API version\n\
             3. Verify your API keys are correctly configured\n\
             4. Check our status page for any ongoing issues\n\
             Technical support: tech@company.com",
        ),
        (
            GENERAL_KEY,
            "Thank you for contacting our support team.\n\
             We're here to help you with any questions or concerns.\n\
             You can also check our FAQ at help.company.com",
        ),
    ])
});

impl KnowledgeBase {
    /// The built-in knowledge base, loaded once per process.
    pub fn builtin() -> &'static KnowledgeBase {
        &DEFAULT_KNOWLEDGE
    }

    /// Build a knowledge base from `(key, text)` pairs.
    ///
    /// A `general` entry should be present; lookups fall back to it.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static str)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Normalize a category label into a key: lowercase, spaces to underscores.
    pub fn key_for(category: &str) -> String {
        category.trim().to_lowercase().replace(' ', "_")
    }

    /// Advisory block for a category label, falling back to the general block.
    pub fn lookup(&self, category: &str) -> &'static str {
        self.entries
            .get(Self::key_for(category).as_str())
            .or_else(|| self.entries.get(GENERAL_KEY))
            .copied()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
