//! Shared types for the triage engine.

use serde::{Deserialize, Deserializer, Serialize};

// ── Inbound email ───────────────────────────────────────────────────

/// Subject and body of an incoming support email.
///
/// Missing or `null` fields are treated as empty strings, never as errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailText {
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
}

/// Deserialize an explicit `null` the same as an absent field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl EmailText {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Lowercased `"{subject} {body}"`, the text every lexicon test runs against.
    pub fn combined_lowercase(&self) -> String {
        format!("{} {}", self.subject, self.body).to_lowercase()
    }
}

// ── Classification labels ───────────────────────────────────────────

/// Sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Exact match on the lowercase label. Anything else is `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "positive" => Some(Self::Positive),
            "neutral" => Some(Self::Neutral),
            "negative" => Some(Self::Negative),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Normal,
    Urgent,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Urgent => "Urgent",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topical category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Account Access")]
    AccountAccess,
    #[serde(rename = "Billing")]
    Billing,
    #[serde(rename = "Technical Support")]
    TechnicalSupport,
    #[serde(rename = "Pricing")]
    Pricing,
    #[serde(rename = "General Support")]
    GeneralSupport,
}

impl Category {
    /// Display label, as sent over the wire and fed back into `respond`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccountAccess => "Account Access",
            Self::Billing => "Billing",
            Self::TechnicalSupport => "Technical Support",
            Self::Pricing => "Pricing",
            Self::GeneralSupport => "General Support",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognized customer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    PasswordReset,
    RefundRequest,
    Cancellation,
}

// ── Results ─────────────────────────────────────────────────────────

/// Structured fields pulled out of an email body.
///
/// Empty fields are omitted from the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedInfo {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact_emails: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<RequestType>,
}

impl ExtractedInfo {
    pub fn is_empty(&self) -> bool {
        self.contact_emails.is_empty()
            && self.phone_numbers.is_empty()
            && self.request_type.is_none()
    }
}

/// Output of the classifier for a single email.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub sentiment: Sentiment,
    /// Only set when an external sentiment provider produced the label.
    pub sentiment_score: Option<f64>,
    pub priority: Priority,
    pub category: Category,
}

/// Full triage result for one email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    pub priority: Priority,
    pub category: Category,
    #[serde(rename = "extracted_info")]
    pub extracted: ExtractedInfo,
}

impl AnalysisResult {
    pub fn new(classification: Classification, extracted: ExtractedInfo) -> Self {
        Self {
            sentiment: classification.sentiment,
            sentiment_score: classification.sentiment_score,
            priority: classification.priority,
            category: classification.category,
            extracted,
        }
    }
}
