//! Keyword classifier for sentiment, priority, and category.
//!
//! All three dimensions are first-match-wins over the lexicon tables and fall
//! through to a default branch (neutral / Normal / General Support) when
//! nothing matches. Sentiment can optionally be delegated to an external
//! provider; any provider failure falls back to lexicon counting.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::triage::lexicon::{Lexicon, contains_any, count_present};
use crate::triage::sentiment::{SentimentProvider, SentimentScores};
use crate::triage::types::{Category, Classification, EmailText, Priority, Sentiment};

/// How sentiment is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SentimentStrategy {
    /// Polarity word counting. Always available, never reports a score.
    #[default]
    Lexicon,
    /// External provider, with lexicon counting as fallback.
    Model,
}

impl SentimentStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "lexicon" => Some(Self::Lexicon),
            "model" => Some(Self::Model),
            _ => None,
        }
    }
}

/// Classifies emails against a lexicon and an optional sentiment provider.
#[derive(Clone)]
pub struct Classifier {
    lexicon: &'static Lexicon,
    provider: Option<Arc<dyn SentimentProvider>>,
}

impl Classifier {
    /// Lexicon-only classifier.
    pub fn new(lexicon: &'static Lexicon) -> Self {
        Self {
            lexicon,
            provider: None,
        }
    }

    /// Attach an external sentiment provider (takes precedence when it succeeds).
    pub fn with_provider(mut self, provider: Arc<dyn SentimentProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn strategy(&self) -> SentimentStrategy {
        if self.provider.is_some() {
            SentimentStrategy::Model
        } else {
            SentimentStrategy::Lexicon
        }
    }

    /// Classify an email. Total for all inputs.
    pub fn classify(&self, email: &EmailText) -> Classification {
        let text = email.combined_lowercase();
        let (sentiment, sentiment_score) = self.sentiment(email, &text);
        self.finish(&text, sentiment, sentiment_score)
    }

    /// Classify with a distribution the caller already obtained from a model.
    ///
    /// `None` uses lexicon counting; the attached provider is not consulted.
    pub fn classify_with_scores(
        &self,
        email: &EmailText,
        scores: Option<SentimentScores>,
    ) -> Classification {
        let text = email.combined_lowercase();
        let (sentiment, sentiment_score) = match scores {
            Some(scores) => {
                let (label, score) = scores.top();
                (label, Some(score))
            }
            None => (self.lexicon_sentiment(&text), None),
        };
        self.finish(&text, sentiment, sentiment_score)
    }

    fn finish(
        &self,
        text: &str,
        sentiment: Sentiment,
        sentiment_score: Option<f64>,
    ) -> Classification {
        let priority = self.priority(text);
        let category = self.category(text);

        debug!(
            sentiment = %sentiment,
            priority = %priority,
            category = %category,
            "Email classified"
        );

        Classification {
            sentiment,
            sentiment_score,
            priority,
            category,
        }
    }

    fn sentiment(&self, email: &EmailText, lowered: &str) -> (Sentiment, Option<f64>) {
        if let Some(ref provider) = self.provider {
            // Models see subject and body as written.
            let raw = format!("{} {}", email.subject, email.body);
            match provider.score(&raw) {
                Ok(scores) => {
                    let (label, score) = scores.top();
                    return (label, Some(score));
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "Sentiment provider failed, falling back to lexicon"
                    );
                }
            }
        }
        (self.lexicon_sentiment(lowered), None)
    }

    /// Compare polarity counts; ties (including zero/zero) are neutral.
    pub fn lexicon_sentiment(&self, lowered: &str) -> Sentiment {
        let negative = count_present(lowered, self.lexicon.negative_words);
        let positive = count_present(lowered, self.lexicon.positive_words);

        if negative > positive {
            Sentiment::Negative
        } else if positive > negative {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        }
    }

    /// Critical keywords are checked before urgent ones.
    pub fn priority(&self, lowered: &str) -> Priority {
        if contains_any(lowered, self.lexicon.critical_keywords) {
            Priority::Critical
        } else if contains_any(lowered, self.lexicon.urgent_keywords) {
            Priority::Urgent
        } else {
            Priority::Normal
        }
    }

    /// First category group with any keyword present.
    pub fn category(&self, lowered: &str) -> Category {
        self.lexicon
            .categories
            .iter()
            .find(|rule| contains_any(lowered, rule.keywords))
            .map(|rule| rule.category)
            .unwrap_or(Category::GeneralSupport)
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("strategy", &self.strategy())
            .field(
                "provider",
                &self.provider.as_ref().map(|p| p.name().to_string()),
            )
            .finish()
    }
}
