//! Triage facade, the single entry point for the transport layer.
//!
//! `analyze` runs classification then extraction; `respond` renders a reply
//! from labels the caller already holds. The engine keeps no per-call state,
//! so one instance is shared by every request.

use std::sync::Arc;

use tracing::info;

use crate::config::TriageConfig;
use crate::triage::classifier::Classifier;
use crate::triage::composer::Composer;
use crate::triage::extractor::Extractor;
use crate::triage::knowledge::KnowledgeBase;
use crate::triage::lexicon::Lexicon;
use crate::triage::quick_reply::{self, ReplyKind};
use crate::triage::sentiment::SentimentProvider;
use crate::triage::types::{AnalysisResult, EmailText};

/// Composes classifier, extractor, and composer.
#[derive(Debug, Clone)]
pub struct TriageEngine {
    classifier: Classifier,
    extractor: Extractor,
    composer: Composer,
}

impl TriageEngine {
    pub fn new(classifier: Classifier, extractor: Extractor, composer: Composer) -> Self {
        Self {
            classifier,
            extractor,
            composer,
        }
    }

    /// Build an engine over the built-in tables selected by `config`.
    ///
    /// Any `provider` given is attached and switches sentiment to the model
    /// strategy. [`TriageConfig::build_provider`] only yields one when the
    /// configured strategy is `model`.
    pub fn from_config(
        config: &TriageConfig,
        provider: Option<Arc<dyn SentimentProvider>>,
    ) -> Self {
        let lexicon = Lexicon::for_profile(config.lexicon_profile);

        let mut classifier = Classifier::new(lexicon);
        if let Some(provider) = provider {
            classifier = classifier.with_provider(provider);
        }

        Self::new(
            classifier,
            Extractor::new(lexicon.request_triggers),
            Composer::new(config.reply_template, KnowledgeBase::builtin()),
        )
    }

    /// Triage one email. Total for all inputs.
    pub fn analyze(&self, email: &EmailText) -> AnalysisResult {
        let classification = self.classifier.classify(email);
        let extracted = self.extractor.extract(&email.body);
        let result = AnalysisResult::new(classification, extracted);

        info!(
            sentiment = %result.sentiment,
            priority = %result.priority,
            category = %result.category,
            scored = result.sentiment_score.is_some(),
            emails = result.extracted.contact_emails.len(),
            phones = result.extracted.phone_numbers.len(),
            "Email analyzed"
        );
        result
    }

    /// Render a reply from previously computed labels. Unknown labels fall
    /// through to defaults.
    pub fn respond(&self, body: &str, sentiment: &str, category: &str) -> String {
        self.composer.compose(body, sentiment, category)
    }

    /// LLM hand-off prompt for the same inputs as [`TriageEngine::respond`].
    pub fn draft_prompt(&self, body: &str, sentiment: &str, category: &str) -> String {
        self.composer.draft_prompt(body, sentiment, category)
    }

    /// One-line acknowledgement for `content`. Unknown `kind` labels use the
    /// general sentence.
    pub fn quick_reply(&self, content: &str, kind: &str) -> String {
        let kind = ReplyKind::from_label(kind);
        info!(kind = kind.as_str(), "Quick reply generated");
        quick_reply::quick_reply(content, kind)
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }
}
