// Request and response bodies of the REST API, plus the boundary validation
// the ranking pipeline relies on.
use carfit_core::{SentimentPreference, UserProfile};
use carfit_ranking::{compatibility_note, RecommendationResult, RecommendedItem, ScoreBreakdown, Section};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("budget_min must be greater than or equal to 0")]
    NegativeBudgetMin,
    #[error("budget_max must be greater than 0")]
    NonPositiveBudgetMax,
    #[error("budget_min must be less than budget_max")]
    BudgetOrder,
    #[error("quality_threshold must be between -1 and 1")]
    QualityThreshold,
    #[error("sentiment_preference must be one of 'positive', 'neutral' or 'any', got '{0}'")]
    SentimentPreference(String),
    #[error("aspect priority '{0}' must be between 0 and 1")]
    AspectPriority(String),
    #[error("{name} must be between 1 and {max}")]
    Count { name: &'static str, max: usize },
}

fn default_quality_threshold() -> f64 {
    0.3
}

fn default_sentiment() -> String {
    "positive".to_string()
}

fn default_emotions() -> Vec<String> {
    vec!["Happy".to_string(), "Satisfied".to_string()]
}

/// User profile as sent by clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub car_brand: String,
    #[serde(default)]
    pub car_model: Option<String>,
    pub budget_min: f64,
    pub budget_max: f64,
    #[serde(default)]
    pub preferred_categories: Vec<String>,
    #[serde(default = "default_quality_threshold")]
    pub quality_threshold: f64,
    #[serde(default = "default_sentiment")]
    pub sentiment_preference: String,
    #[serde(default = "default_emotions")]
    pub emotion_preference: Vec<String>,
    #[serde(default)]
    pub aspect_priorities: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub search_query: Option<String>,
}

impl ProfileRequest {
    /// Check ranges and convert into the core profile
    pub fn into_profile(self) -> Result<UserProfile, ValidationError> {
        if self.budget_min < 0.0 {
            return Err(ValidationError::NegativeBudgetMin);
        }
        if self.budget_max <= 0.0 {
            return Err(ValidationError::NonPositiveBudgetMax);
        }
        if self.budget_min >= self.budget_max {
            return Err(ValidationError::BudgetOrder);
        }
        if !(-1.0..=1.0).contains(&self.quality_threshold) {
            return Err(ValidationError::QualityThreshold);
        }
        let sentiment = SentimentPreference::parse(&self.sentiment_preference)
            .ok_or_else(|| ValidationError::SentimentPreference(self.sentiment_preference.clone()))?;
        if let Some(priorities) = &self.aspect_priorities {
            if let Some((aspect, _)) = priorities.iter().find(|(_, w)| !(0.0..=1.0).contains(*w)) {
                return Err(ValidationError::AspectPriority(aspect.clone()));
            }
        }

        Ok(UserProfile {
            car_brand: self.car_brand,
            car_model: self.car_model,
            budget_min: self.budget_min,
            budget_max: self.budget_max,
            quality_threshold: self.quality_threshold,
            sentiment_preference: sentiment,
            emotion_preference: self.emotion_preference,
            preferred_categories: self.preferred_categories,
            search_query: self.search_query,
            aspect_priorities: self.aspect_priorities,
        })
    }
}

/// Resolve an optional count query parameter against its default and limit
pub fn resolve_count(
    value: Option<i64>,
    default: usize,
    max: usize,
    name: &'static str,
) -> Result<usize, ValidationError> {
    match value {
        None => Ok(default),
        Some(v) if v >= 1 && v <= max as i64 => Ok(v as usize),
        Some(_) => Err(ValidationError::Count { name, max }),
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub top_k: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SectionedQuery {
    pub exact_match_count: Option<i64>,
    pub compatible_count: Option<i64>,
}

/// One recommended accessory on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessoryRecommendation {
    pub accessory_id: String,
    pub accessory_name: String,
    pub car_brand: String,
    pub car_model: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub sentiment_score: f64,
    pub sentiment_label: String,
    pub quality_score: f64,
    pub dominant_emotion: String,
    pub final_score: f64,
    pub explanation: String,
    pub compatible_cars: String,
    pub is_cross_compatible: bool,
    pub compatibility_note: String,
    pub top_reviews: String,
    pub key_strengths: String,
    pub key_weaknesses: String,
}

impl AccessoryRecommendation {
    pub fn from_item(item: &RecommendedItem<'_>, profile: &UserProfile) -> Self {
        let record = item.record();
        let note = compatibility_note(record, profile);
        Self {
            accessory_id: record.id().to_string(),
            accessory_name: record.name().to_string(),
            car_brand: record.brand().to_string(),
            car_model: record.model().to_string(),
            price: record.price,
            category: record.category.clone(),
            description: record.description.clone(),
            sentiment_score: record.sentiment_score,
            sentiment_label: record.sentiment_label.clone(),
            quality_score: record.quality_score,
            dominant_emotion: record.dominant_emotion.clone(),
            final_score: item.final_score(),
            explanation: item.explanation.clone(),
            compatible_cars: record.compatible_cars().to_string(),
            is_cross_compatible: note.is_some(),
            compatibility_note: note.unwrap_or_default(),
            top_reviews: record.top_reviews.clone(),
            key_strengths: record.key_strengths.clone(),
            key_weaknesses: record.key_weaknesses.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub count: usize,
    pub recommendations: Vec<AccessoryRecommendation>,
    pub score_breakdown: Option<BTreeMap<String, ScoreBreakdown>>,
}

impl RecommendationResponse {
    /// An empty result is reported with `success: false` and no breakdown
    pub fn from_result(result: &RecommendationResult<'_>, profile: &UserProfile) -> Self {
        if result.is_empty() {
            return Self {
                success: false,
                count: 0,
                recommendations: Vec::new(),
                score_breakdown: None,
            };
        }
        let recommendations: Vec<AccessoryRecommendation> = result
            .items
            .iter()
            .map(|item| AccessoryRecommendation::from_item(item, profile))
            .collect();
        Self {
            success: true,
            count: recommendations.len(),
            recommendations,
            score_breakdown: Some(result.score_breakdown.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResponse {
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub body: RecommendationResponse,
}

impl SectionResponse {
    pub fn from_section(section: &Section<'_>, profile: &UserProfile) -> Self {
        Self {
            title: section.title.to_string(),
            description: section.description.clone(),
            body: RecommendationResponse::from_result(&section.result, profile),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionedResponse {
    pub success: bool,
    pub total_count: usize,
    pub exact_match: SectionResponse,
    pub compatible: SectionResponse,
}

/// Abbreviated item shown by the demo endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoRecommendation {
    pub accessory_name: String,
    /// Formatted, e.g. `₹1,200`
    pub price: String,
    pub category: String,
    /// Final score with three decimals
    pub score: String,
    pub explanation: String,
}
