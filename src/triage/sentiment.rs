//! Pluggable sentiment providers.
//!
//! A provider scores text into a distribution over the fixed three-class
//! label set. The classifier treats every provider as optional: when one is
//! missing or fails, it falls back to lexicon polarity counting.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::error::SentimentError;
use crate::triage::types::Sentiment;

/// Probability per label. Providers are expected to return values that sum to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SentimentScores {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
}

impl SentimentScores {
    /// Fold raw `(label, score)` pairs into the three-class distribution.
    ///
    /// Model labels `LABEL_0/1/2` and the plain names are both accepted;
    /// anything unrecognized counts toward neutral.
    pub fn from_labels<I, S>(pairs: I) -> Result<Self, SentimentError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut scores = Self::default();
        let mut seen = 0usize;
        for (label, score) in pairs {
            if !score.is_finite() || score < 0.0 {
                return Err(SentimentError::InvalidResponse {
                    provider: "labels".into(),
                    reason: format!("score {score} for label '{}'", label.as_ref()),
                });
            }
            let slot = match map_model_label(label.as_ref()) {
                Sentiment::Negative => &mut scores.negative,
                Sentiment::Neutral => &mut scores.neutral,
                Sentiment::Positive => &mut scores.positive,
            };
            *slot = slot.max(score);
            seen += 1;
        }
        if seen == 0 {
            return Err(SentimentError::EmptyDistribution {
                provider: "labels".into(),
            });
        }
        Ok(scores)
    }

    /// Argmax label and its score rounded to 3 decimals.
    ///
    /// Ties resolve in label order: negative, neutral, positive.
    pub fn top(&self) -> (Sentiment, f64) {
        let mut best = (Sentiment::Negative, self.negative);
        for candidate in [
            (Sentiment::Neutral, self.neutral),
            (Sentiment::Positive, self.positive),
        ] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        (best.0, round3(best.1))
    }
}

/// Map a raw model label onto the three-class set.
pub fn map_model_label(label: &str) -> Sentiment {
    match label.trim().to_lowercase().as_str() {
        "label_0" | "negative" => Sentiment::Negative,
        "label_2" | "positive" => Sentiment::Positive,
        _ => Sentiment::Neutral,
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Capability interface for an external sentiment model.
///
/// Calls may block (network or inference). Implementations must be safe to
/// share across threads.
pub trait SentimentProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Score `text` into a label distribution.
    fn score(&self, text: &str) -> Result<SentimentScores, SentimentError>;
}

// ── HTTP inference adapter ──────────────────────────────────────────

/// Settings for [`HttpSentimentProvider`].
#[derive(Debug, Clone)]
pub struct HttpSentimentConfig {
    /// Inference endpoint accepting `{"inputs": "..."}`.
    pub endpoint: String,
    /// Bearer token, if the endpoint needs one.
    pub api_token: Option<SecretString>,
    pub timeout: Duration,
}

/// Sentiment provider backed by a hosted text-classification endpoint.
pub struct HttpSentimentProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_token: Option<SecretString>,
}

const HTTP_PROVIDER_NAME: &str = "http";

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Text-classification endpoints return either one list per input or a flat list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl HttpSentimentProvider {
    /// Build the blocking client. Must be called outside an async context.
    pub fn new(config: HttpSentimentConfig) -> Result<Self, SentimentError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SentimentError::RequestFailed {
                provider: HTTP_PROVIDER_NAME.into(),
                reason: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
            api_token: config.api_token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SentimentProvider for HttpSentimentProvider {
    fn name(&self) -> &str {
        HTTP_PROVIDER_NAME
    }

    fn score(&self, text: &str) -> Result<SentimentScores, SentimentError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let request_failed = |e: reqwest::Error| SentimentError::RequestFailed {
            provider: HTTP_PROVIDER_NAME.into(),
            reason: e.to_string(),
        };
        let response = request
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(request_failed)?;
        let raw = response.text().map_err(request_failed)?;

        debug!(endpoint = %self.endpoint, bytes = raw.len(), "Sentiment endpoint responded");
        parse_inference_response(&raw)
    }
}

/// Parse a text-classification response body into scores.
fn parse_inference_response(raw: &str) -> Result<SentimentScores, SentimentError> {
    let parsed: InferenceResponse =
        serde_json::from_str(raw).map_err(|e| SentimentError::InvalidResponse {
            provider: HTTP_PROVIDER_NAME.into(),
            reason: format!("JSON parse error: {e}"),
        })?;

    let labels = match parsed {
        InferenceResponse::Nested(mut lists) => {
            if lists.is_empty() {
                Vec::new()
            } else {
                lists.swap_remove(0)
            }
        }
        InferenceResponse::Flat(list) => list,
    };

    SentimentScores::from_labels(labels.into_iter().map(|l| (l.label, l.score))).map_err(|e| {
        match e {
            SentimentError::EmptyDistribution { .. } => SentimentError::EmptyDistribution {
                provider: HTTP_PROVIDER_NAME.into(),
            },
            SentimentError::InvalidResponse { reason, .. } => SentimentError::InvalidResponse {
                provider: HTTP_PROVIDER_NAME.into(),
                reason,
            },
            other => other,
        }
    })
}
