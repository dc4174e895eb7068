//! Configuration types, loaded from environment variables.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::{ConfigError, SentimentError};
use crate::triage::classifier::SentimentStrategy;
use crate::triage::composer::{DEFAULT_ECHO_MAX_LEN, ReplyTemplate};
use crate::triage::lexicon::LexiconProfile;
use crate::triage::sentiment::{HttpSentimentConfig, HttpSentimentProvider, SentimentProvider};

/// Default sentiment endpoint timeout.
const DEFAULT_SENTIMENT_TIMEOUT_SECS: u64 = 10;

/// Default HTTP port.
const DEFAULT_PORT: u16 = 5000;

/// Triage engine configuration.
#[derive(Debug, Clone, Default)]
pub struct TriageConfig {
    /// Lexicon counting or external model.
    pub sentiment_strategy: SentimentStrategy,
    /// Which keyword tables to load.
    pub lexicon_profile: LexiconProfile,
    /// Fixed replies, or replies echoing an excerpt of the email.
    pub reply_template: ReplyTemplate,
    /// Sentiment endpoint, required by the model strategy.
    pub sentiment_endpoint: Option<HttpSentimentConfig>,
}

impl TriageConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sentiment_strategy = match non_empty(&lookup, "TRIAGE_SENTIMENT_STRATEGY") {
            Some(raw) => SentimentStrategy::parse(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: "TRIAGE_SENTIMENT_STRATEGY".into(),
                message: format!("expected 'lexicon' or 'model', got '{raw}'"),
            })?,
            None => SentimentStrategy::default(),
        };

        let lexicon_profile = match non_empty(&lookup, "TRIAGE_LEXICON_PROFILE") {
            Some(raw) => LexiconProfile::parse(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: "TRIAGE_LEXICON_PROFILE".into(),
                message: format!("expected 'extended' or 'compact', got '{raw}'"),
            })?,
            None => LexiconProfile::default(),
        };

        let reply_template = match non_empty(&lookup, "TRIAGE_REPLY_MODE")
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            None | Some("fixed") => ReplyTemplate::Fixed,
            Some("echo") => ReplyTemplate::Echo {
                max_len: parse_or(&lookup, "TRIAGE_ECHO_MAX_LEN", DEFAULT_ECHO_MAX_LEN)?,
            },
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "TRIAGE_REPLY_MODE".into(),
                    message: format!("expected 'fixed' or 'echo', got '{other}'"),
                });
            }
        };

        let sentiment_endpoint = match non_empty(&lookup, "TRIAGE_SENTIMENT_URL") {
            Some(endpoint) => Some(HttpSentimentConfig {
                endpoint,
                api_token: non_empty(&lookup, "TRIAGE_SENTIMENT_TOKEN").map(SecretString::from),
                timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "TRIAGE_SENTIMENT_TIMEOUT_SECS",
                    DEFAULT_SENTIMENT_TIMEOUT_SECS,
                )?),
            }),
            None => None,
        };

        if sentiment_strategy == SentimentStrategy::Model && sentiment_endpoint.is_none() {
            return Err(ConfigError::MissingRequired {
                key: "TRIAGE_SENTIMENT_URL".into(),
                hint: "The model sentiment strategy needs an inference endpoint.".into(),
            });
        }

        Ok(Self {
            sentiment_strategy,
            lexicon_profile,
            reply_template,
            sentiment_endpoint,
        })
    }

    /// Build the external provider if the model strategy is selected.
    ///
    /// Uses a blocking HTTP client, so call this before entering an async runtime.
    pub fn build_provider(&self) -> Result<Option<Arc<dyn SentimentProvider>>, SentimentError> {
        match (self.sentiment_strategy, &self.sentiment_endpoint) {
            (SentimentStrategy::Model, Some(endpoint)) => {
                let provider = HttpSentimentProvider::new(endpoint.clone())?;
                tracing::info!(endpoint = %provider.endpoint(), "Using HTTP sentiment provider");
                Ok(Some(Arc::new(provider)))
            }
            _ => Ok(None),
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `TRIAGE_PORT` wins over the platform-provided `PORT`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = non_empty(&lookup, "TRIAGE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = if non_empty(&lookup, "TRIAGE_PORT").is_some() {
            parse_or(&lookup, "TRIAGE_PORT", DEFAULT_PORT)?
        } else {
            parse_or(&lookup, "PORT", DEFAULT_PORT)?
        };
        Ok(Self { host, port })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup, key) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{raw}': {e}"),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = TriageConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.sentiment_strategy, SentimentStrategy::Lexicon);
        assert_eq!(config.lexicon_profile, LexiconProfile::Extended);
        assert_eq!(config.reply_template, ReplyTemplate::Fixed);
        assert!(config.sentiment_endpoint.is_none());
        assert!(config.build_provider().unwrap().is_none());
    }

    #[test]
    fn echo_mode_with_length() {
        let config = TriageConfig::from_lookup(lookup_from(&[
            ("TRIAGE_REPLY_MODE", "Echo"),
            ("TRIAGE_ECHO_MAX_LEN", "30"),
        ]))
        .unwrap();
        assert_eq!(config.reply_template, ReplyTemplate::Echo { max_len: 30 });
    }

    #[test]
    fn echo_mode_default_length() {
        let config =
            TriageConfig::from_lookup(lookup_from(&[("TRIAGE_REPLY_MODE", "echo")])).unwrap();
        assert_eq!(
            config.reply_template,
            ReplyTemplate::Echo {
                max_len: DEFAULT_ECHO_MAX_LEN
            }
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        for pairs in [
            vec![("TRIAGE_SENTIMENT_STRATEGY", "transformer")],
            vec![("TRIAGE_LEXICON_PROFILE", "huge")],
            vec![("TRIAGE_REPLY_MODE", "poetry")],
            vec![("TRIAGE_REPLY_MODE", "echo"), ("TRIAGE_ECHO_MAX_LEN", "-3")],
        ] {
            let result = TriageConfig::from_lookup(lookup_from(&pairs));
            assert!(
                matches!(result, Err(ConfigError::InvalidValue { .. })),
                "expected InvalidValue for {pairs:?}"
            );
        }
    }

    #[test]
    fn model_strategy_requires_endpoint() {
        let result =
            TriageConfig::from_lookup(lookup_from(&[("TRIAGE_SENTIMENT_STRATEGY", "model")]));
        assert!(matches!(result, Err(ConfigError::MissingRequired { .. })));
    }

    #[test]
    fn model_strategy_with_endpoint() {
        let config = TriageConfig::from_lookup(lookup_from(&[
            ("TRIAGE_SENTIMENT_STRATEGY", "model"),
            ("TRIAGE_SENTIMENT_URL", "http://127.0.0.1:9/classify"),
            ("TRIAGE_SENTIMENT_TOKEN", "hf_secret"),
            ("TRIAGE_SENTIMENT_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        let endpoint = config.sentiment_endpoint.as_ref().unwrap();
        assert_eq!(endpoint.endpoint, "http://127.0.0.1:9/classify");
        assert!(endpoint.api_token.is_some());
        assert_eq!(endpoint.timeout, Duration::from_secs(3));

        let provider = config.build_provider().unwrap().unwrap();
        assert_eq!(provider.name(), "http");
    }

    #[test]
    fn endpoint_without_model_strategy_is_unused() {
        let config = TriageConfig::from_lookup(lookup_from(&[(
            "TRIAGE_SENTIMENT_URL",
            "http://127.0.0.1:9/classify",
        )]))
        .unwrap();
        assert!(config.build_provider().unwrap().is_none());
    }

    #[test]
    fn server_port_precedence() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());

        let config = ServerConfig::from_lookup(lookup_from(&[("PORT", "8080")])).unwrap();
        assert_eq!(config.port, 8080);

        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("TRIAGE_PORT", "9090"),
            ("TRIAGE_HOST", "127.0.0.1"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn server_port_must_be_numeric() {
        let result = ServerConfig::from_lookup(lookup_from(&[("PORT", "http")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
