use crate::accessory::normalize_text;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How strictly review sentiment gates eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentPreference {
    /// Only accessories labelled Positive
    #[default]
    Positive,
    /// Positive or Neutral
    Neutral,
    /// No sentiment filtering
    Any,
}

impl SentimentPreference {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(SentimentPreference::Positive),
            "neutral" => Some(SentimentPreference::Neutral),
            "any" => Some(SentimentPreference::Any),
            _ => None,
        }
    }
}

/// Per-request description of the user's car and preferences.
///
/// Range checks (budget ordering, threshold bounds) belong to the caller;
/// the ranking pipeline assumes a validated profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub car_brand: String,
    #[serde(default)]
    pub car_model: Option<String>,
    pub budget_min: f64,
    pub budget_max: f64,
    #[serde(default = "default_quality_threshold")]
    pub quality_threshold: f64,
    #[serde(default)]
    pub sentiment_preference: SentimentPreference,
    #[serde(default)]
    pub emotion_preference: Vec<String>,
    #[serde(default)]
    pub preferred_categories: Vec<String>,
    #[serde(default)]
    pub search_query: Option<String>,
    /// Accepted for compatibility with callers; no scoring formula reads it.
    #[serde(default)]
    pub aspect_priorities: Option<BTreeMap<String, f64>>,
}

fn default_quality_threshold() -> f64 {
    0.3
}

impl UserProfile {
    pub fn new(car_brand: impl Into<String>, car_model: Option<&str>, budget_min: f64, budget_max: f64) -> Self {
        Self {
            car_brand: car_brand.into(),
            car_model: car_model.map(str::to_string),
            budget_min,
            budget_max,
            quality_threshold: default_quality_threshold(),
            sentiment_preference: SentimentPreference::default(),
            emotion_preference: Vec::new(),
            preferred_categories: Vec::new(),
            search_query: None,
            aspect_priorities: None,
        }
    }

    #[must_use]
    pub fn with_quality_threshold(mut self, threshold: f64) -> Self {
        self.quality_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_sentiment(mut self, preference: SentimentPreference) -> Self {
        self.sentiment_preference = preference;
        self
    }

    #[must_use]
    pub fn with_emotions<I, S>(mut self, emotions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.emotion_preference = emotions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Normalized brand, empty when unspecified
    pub fn brand_key(&self) -> String {
        normalize_text(&self.car_brand)
    }

    /// Normalized model, empty when unspecified
    pub fn model_key(&self) -> String {
        self.car_model.as_deref().map(normalize_text).unwrap_or_default()
    }

    /// Display model, empty when unspecified
    pub fn model_display(&self) -> &str {
        self.car_model.as_deref().unwrap_or("")
    }

    /// Search query, if it contains anything beyond whitespace
    pub fn query(&self) -> Option<&str> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_normalized() {
        let profile = UserProfile::new(" Toyota ", Some("CAMRY"), 500.0, 3000.0);
        assert_eq!(profile.brand_key(), "toyota");
        assert_eq!(profile.model_key(), "camry");
        assert_eq!(profile.model_display(), "CAMRY");

        let brand_only = UserProfile::new("Honda", None, 500.0, 3000.0);
        assert_eq!(brand_only.model_key(), "");
    }

    #[test]
    fn test_blank_query_is_unspecified() {
        let profile = UserProfile::new("Toyota", None, 0.0, 1.0).with_query("   ");
        assert!(profile.query().is_none());

        let profile = profile.with_query(" seat cover ");
        assert_eq!(profile.query(), Some("seat cover"));
    }

    #[test]
    fn test_sentiment_preference_parse() {
        assert_eq!(SentimentPreference::parse("Positive"), Some(SentimentPreference::Positive));
        assert_eq!(SentimentPreference::parse("neutral"), Some(SentimentPreference::Neutral));
        assert_eq!(SentimentPreference::parse("ANY"), Some(SentimentPreference::Any));
        assert_eq!(SentimentPreference::parse("negative"), None);
    }

    #[test]
    fn test_profile_deserialization_defaults() {
        let json = serde_json::json!({
            "car_brand": "Toyota",
            "budget_min": 500.0,
            "budget_max": 3000.0
        });
        let profile: UserProfile = serde_json::from_value(json).unwrap();

        assert!(profile.car_model.is_none());
        assert_eq!(profile.sentiment_preference, SentimentPreference::Positive);
        assert!(profile.emotion_preference.is_empty());
        assert!(profile.aspect_priorities.is_none());
        assert!((profile.quality_threshold - 0.3).abs() < 1e-9);
    }
}
