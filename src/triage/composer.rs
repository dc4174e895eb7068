//! Template-based reply composition.
//!
//! A reply is greeting (by sentiment) + main block (by category) + a fixed
//! closing, joined by blank lines. Unrecognized sentiment or category values
//! fall through to the neutral greeting and the generic block.

use crate::triage::knowledge::KnowledgeBase;
use crate::triage::types::{Category, Sentiment};

const GREETING_NEGATIVE: &str = "Thank you for reaching out, and I sincerely apologize for any inconvenience you've experienced.";
const GREETING_POSITIVE: &str = "Thank you for your message! We're happy to help.";
const GREETING_NEUTRAL: &str = "Thank you for contacting our support team.";

const BODY_ACCOUNT: &str = "I understand you're having trouble with account access. Here are some immediate steps you can try:

1. Use the 'Forgot Password' link on our login page
2. Clear your browser cache and try again
3. Try accessing your account from an incognito window

If these steps don't resolve the issue, I'll be happy to manually reset your account access.";

const BODY_BILLING: &str = "I'll help you resolve this billing concern right away. Our billing team will investigate this matter and ensure any errors are corrected promptly.

For immediate assistance with billing issues, you can also access your billing history in your account dashboard.";

const BODY_TECHNICAL: &str = "I'll connect you with our technical support team who specialize in API and integration issues. They'll provide you with detailed guidance to resolve this technical matter.

In the meantime, you might find our documentation helpful at docs.company.com";

const BODY_GENERAL: &str = "I've received your inquiry and will ensure you get the assistance you need. Our team will review your request and provide a detailed response shortly.";

const CLOSING: &str = "Please don't hesitate to reach out if you have any additional questions. We're committed to ensuring you have the best possible experience with our service.

Best regards,
The Support Team";

/// Default echo excerpt length in characters.
pub const DEFAULT_ECHO_MAX_LEN: usize = 50;

/// Reply body shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplyTemplate {
    /// Fixed prose only; output depends on sentiment and category alone.
    #[default]
    Fixed,
    /// Fixed prose plus a line quoting the first `max_len` characters of the email.
    Echo { max_len: usize },
}

/// Renders reply text and LLM drafting prompts.
#[derive(Debug, Clone)]
pub struct Composer {
    template: ReplyTemplate,
    knowledge: &'static KnowledgeBase,
}

impl Composer {
    pub fn new(template: ReplyTemplate, knowledge: &'static KnowledgeBase) -> Self {
        Self {
            template,
            knowledge,
        }
    }

    pub fn template(&self) -> ReplyTemplate {
        self.template
    }

    /// Render a reply. `sentiment` and `category` are the wire labels.
    pub fn compose(&self, body: &str, sentiment: &str, category: &str) -> String {
        let mut sections = vec![greeting(sentiment)];

        let echo = match self.template {
            ReplyTemplate::Fixed => None,
            ReplyTemplate::Echo { max_len } => echo_line(body, max_len),
        };
        if let Some(ref line) = echo {
            sections.push(line);
        }

        sections.push(main_block(category));
        sections.push(CLOSING);
        sections.join("\n\n")
    }

    /// Typed variant of [`Composer::compose`].
    pub fn compose_for(&self, body: &str, sentiment: Sentiment, category: Category) -> String {
        self.compose(body, sentiment.as_str(), category.as_str())
    }

    /// Knowledge block for a category label.
    pub fn knowledge_for(&self, category: &str) -> &'static str {
        self.knowledge.lookup(category)
    }

    /// Prompt for handing reply drafting to a language model.
    pub fn draft_prompt(&self, body: &str, sentiment: &str, category: &str) -> String {
        let mut prompt = String::with_capacity(body.len() + 512);
        prompt.push_str(&format!("Customer Email: {}\n", body.trim()));
        prompt.push_str(&format!("Customer Sentiment: {}\n", sentiment));
        prompt.push_str(&format!("Issue Category: {}\n", category));
        prompt.push_str(&format!("Knowledge Base:\n{}\n\n", self.knowledge_for(category)));
        prompt.push_str("Generate a professional, empathetic response.");
        prompt
    }
}

fn greeting(sentiment: &str) -> &'static str {
    match Sentiment::from_label(sentiment) {
        Some(Sentiment::Negative) => GREETING_NEGATIVE,
        Some(Sentiment::Positive) => GREETING_POSITIVE,
        _ => GREETING_NEUTRAL,
    }
}

fn main_block(category: &str) -> &'static str {
    let category = category.to_lowercase();
    if category.contains("account") {
        BODY_ACCOUNT
    } else if category.contains("billing") {
        BODY_BILLING
    } else if category.contains("technical") {
        BODY_TECHNICAL
    } else {
        BODY_GENERAL
    }
}

/// `None` for a blank body.
fn echo_line(body: &str, max_len: usize) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("Regarding your message: '{}'", truncate_chars(trimmed, max_len)))
}

/// First `max_len` characters, with `...` appended when anything was cut.
fn truncate_chars(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
