//! One-line acknowledgements keyed by email type.
//!
//! Each type has its own sentence and quotes a prefix of the email. The
//! prefix is always followed by `...`, even when nothing was cut.

/// Confidence reported alongside every quick reply.
pub const QUICK_REPLY_CONFIDENCE: f64 = 0.85;

/// Email type selecting a quick-reply sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Complaint,
    Inquiry,
    Support,
    General,
}

impl ReplyKind {
    /// Exact lowercase match. Unknown types use `General`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "complaint" => Self::Complaint,
            "inquiry" => Self::Inquiry,
            "support" => Self::Support,
            _ => Self::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complaint => "complaint",
            Self::Inquiry => "inquiry",
            Self::Support => "support",
            Self::General => "general",
        }
    }

    /// Characters of the email quoted in the reply.
    pub fn excerpt_len(&self) -> usize {
        match self {
            Self::General => 30,
            Self::Complaint | Self::Inquiry | Self::Support => 50,
        }
    }
}

/// Render the quick reply for `content`.
pub fn quick_reply(content: &str, kind: ReplyKind) -> String {
    let excerpt: String = content.chars().take(kind.excerpt_len()).collect();
    match kind {
        ReplyKind::Complaint => format!(
            "Thank you for bringing this to our attention. We apologize for any inconvenience caused by '{excerpt}...'. We'll investigate this matter promptly and get back to you within 24 hours with a resolution."
        ),
        ReplyKind::Inquiry => format!(
            "Thank you for your inquiry regarding '{excerpt}...'. Based on your question, I'd be happy to provide more detailed information and assist you further."
        ),
        ReplyKind::Support => format!(
            "Thank you for contacting our support team about '{excerpt}...'. We've received your request and our technical team will assist you shortly."
        ),
        ReplyKind::General => format!(
            "Thank you for your email. We appreciate you taking the time to contact us regarding '{excerpt}...'. We'll review your message and respond appropriately."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG: &str = "My dashboard has been showing stale numbers since the upgrade last Tuesday";

    #[test]
    fn unknown_type_falls_back_to_general() {
        assert_eq!(ReplyKind::from_label("feedback"), ReplyKind::General);
        assert_eq!(ReplyKind::from_label("Complaint"), ReplyKind::General);
        assert_eq!(ReplyKind::from_label(""), ReplyKind::General);
        assert_eq!(
            quick_reply(LONG, ReplyKind::from_label("feedback")),
            quick_reply(LONG, ReplyKind::General)
        );
    }

    #[test]
    fn general_quotes_thirty_chars() {
        let reply = quick_reply(LONG, ReplyKind::General);
        assert!(reply.starts_with("Thank you for your email."));
        assert!(reply.contains("regarding 'My dashboard has been showing ...'."));
    }

    #[test]
    fn typed_replies_quote_fifty_chars() {
        let quoted = "'My dashboard has been showing stale numbers since ...'";
        for kind in [ReplyKind::Complaint, ReplyKind::Inquiry, ReplyKind::Support] {
            let reply = quick_reply(LONG, kind);
            assert!(reply.contains(quoted), "{kind:?}: {reply}");
        }
        assert!(quick_reply(LONG, ReplyKind::Complaint).contains("within 24 hours"));
        assert!(quick_reply(LONG, ReplyKind::Support).contains("our technical team"));
    }

    #[test]
    fn short_content_still_gets_ellipsis() {
        let reply = quick_reply("Hi", ReplyKind::Inquiry);
        assert!(reply.contains("regarding 'Hi...'."));
    }

    #[test]
    fn excerpt_is_char_safe() {
        let reply = quick_reply(&"é".repeat(40), ReplyKind::General);
        assert!(reply.contains(&format!("'{}...'", "é".repeat(30))));
    }
}
