//! Multi-factor scoring
//!
//! Every eligible accessory gets five sub-scores in [0, 1] which are blended
//! into a final score with fixed weights:
//!
//! | factor     | weight |
//! |------------|--------|
//! | car        | 0.25   |
//! | content    | 0.20   |
//! | quality    | 0.25   |
//! | preference | 0.20   |
//! | emotion    | 0.10   |

use ahash::AHashSet;
use carfit_core::{AccessoryRecord, Catalog, TextIndex, UserProfile};
use serde::{Deserialize, Serialize};

pub const CAR_WEIGHT: f64 = 0.25;
pub const CONTENT_WEIGHT: f64 = 0.20;
pub const QUALITY_WEIGHT: f64 = 0.25;
pub const PREFERENCE_WEIGHT: f64 = 0.20;
pub const EMOTION_WEIGHT: f64 = 0.10;

/// Score given to a factor the profile says nothing about
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Sub-scores and final score of one candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub car_score: f64,
    pub content_score: f64,
    pub quality_score: f64,
    pub preference_score: f64,
    pub emotion_score: f64,
    pub final_score: f64,
}

impl ScoreBreakdown {
    /// Clamp the sub-scores and compute the weighted final score
    pub fn new(car: f64, content: f64, quality: f64, preference: f64, emotion: f64) -> Self {
        let car_score = clamp_unit(car);
        let content_score = clamp_unit(content);
        let quality_score = clamp_unit(quality);
        let preference_score = clamp_unit(preference);
        let emotion_score = clamp_unit(emotion);
        let final_score = clamp_unit(
            car_score * CAR_WEIGHT
                + content_score * CONTENT_WEIGHT
                + quality_score * QUALITY_WEIGHT
                + preference_score * PREFERENCE_WEIGHT
                + emotion_score * EMOTION_WEIGHT,
        );
        Self {
            car_score,
            content_score,
            quality_score,
            preference_score,
            emotion_score,
            final_score,
        }
    }
}

/// An eligible accessory with its scores
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    /// Catalog position
    pub position: usize,
    pub record: &'a AccessoryRecord,
    pub scores: ScoreBreakdown,
}

impl<'a> ScoredCandidate<'a> {
    #[inline]
    pub fn final_score(&self) -> f64 {
        self.scores.final_score
    }
}

#[inline]
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Map a score from [-1, 1] onto [0, 1]
#[inline]
fn rescale(value: f64) -> f64 {
    (value + 1.0) / 2.0
}

/// Car compatibility; `brand` and `model` are normalized, either may be empty
pub fn car_score(record: &AccessoryRecord, brand: &str, model: &str) -> f64 {
    if brand.is_empty() {
        return NEUTRAL_SCORE;
    }

    let mut score: f64 = 0.0;
    if record.brand_normalized().contains(brand) {
        score += 0.5;
    }
    if record.lists_compatible(model) {
        score += 0.5;
    } else if record.lists_compatible(brand) {
        score += 0.3;
    }
    if record.is_universal() {
        score += 0.2;
    }
    score.min(1.0)
}

/// Content relevance from category preference and query similarity
pub fn content_score(category_match: Option<bool>, similarity: Option<f64>) -> f64 {
    let mut score = NEUTRAL_SCORE;
    if let Some(matched) = category_match {
        score = score * 0.5 + indicator(matched) * 0.5;
    }
    if let Some(similarity) = similarity {
        score = score * 0.3 + similarity * 0.7;
    }
    score
}

/// Quality and sentiment, each rescaled to [0, 1], weighted equally
pub fn quality_score(record: &AccessoryRecord) -> f64 {
    rescale(record.quality_score) * 0.5 + rescale(record.sentiment_score) * 0.5
}

/// Category preference and closeness of the price to the budget midpoint
pub fn preference_score(record: &AccessoryRecord, profile: &UserProfile, category_match: Option<bool>) -> f64 {
    let mut score = NEUTRAL_SCORE;
    if let Some(matched) = category_match {
        score = score * 0.3 + indicator(matched) * 0.7;
    }

    let range = profile.budget_max - profile.budget_min;
    if range > 0.0 {
        let midpoint = (profile.budget_min + profile.budget_max) / 2.0;
        let closeness = (1.0 - (record.price - midpoint).abs() / (range / 2.0)).clamp(0.0, 1.0);
        score = score * 0.5 + closeness * 0.5;
    }
    score
}

/// Alignment of review emotions with the preferred ones.
///
/// Labels are matched case-sensitively; a label with no recorded score counts
/// as zero.
pub fn emotion_score(record: &AccessoryRecord, preferred: &[String]) -> f64 {
    if preferred.is_empty() {
        return NEUTRAL_SCORE;
    }
    let dominant = preferred.iter().any(|e| *e == record.dominant_emotion);
    let mean = preferred
        .iter()
        .map(|e| record.emotion_score(e).unwrap_or(0.0))
        .sum::<f64>()
        / preferred.len() as f64;
    indicator(dominant) * 0.6 + mean * 0.4
}

#[inline]
fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Scores candidate positions of one catalog against one profile
pub struct Scorer<'a> {
    catalog: &'a Catalog,
    index: &'a TextIndex,
}

impl<'a> Scorer<'a> {
    pub fn new(catalog: &'a Catalog, index: &'a TextIndex) -> Self {
        Self { catalog, index }
    }

    /// Score every position, keeping the input order
    pub fn score(&self, profile: &UserProfile, positions: &[usize]) -> Vec<ScoredCandidate<'a>> {
        let brand = profile.brand_key();
        let model = profile.model_key();

        let categories: Option<AHashSet<&str>> = if profile.preferred_categories.is_empty() {
            None
        } else {
            Some(profile.preferred_categories.iter().map(String::as_str).collect())
        };

        let similarities: Option<Vec<f32>> = profile.query().map(|query| {
            let query_vector = self.index.vectorize(query);
            self.index.similarity(&query_vector, positions)
        });

        let records = self.catalog.records();
        positions
            .iter()
            .enumerate()
            .filter_map(|(i, &position)| {
                let record = records.get(position)?;
                let category_match = categories
                    .as_ref()
                    .map(|set| set.contains(record.category.as_str()));
                let similarity = similarities
                    .as_ref()
                    .map(|sims| sims.get(i).copied().unwrap_or(0.0) as f64);

                let scores = ScoreBreakdown::new(
                    car_score(record, &brand, &model),
                    content_score(category_match, similarity),
                    quality_score(record),
                    preference_score(record, profile, category_match),
                    emotion_score(record, &profile.emotion_preference),
                );
                Some(ScoredCandidate {
                    position,
                    record,
                    scores,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carfit_core::VectorizerConfig;

    fn camry_cover() -> AccessoryRecord {
        AccessoryRecord::new("A1", "Leather Seat Cover", "Toyota", "Camry", "Toyota Camry", 1200.0)
            .with_description("Premium leather seat cover")
            .with_category("Interior")
            .with_sentiment(0.6, "Positive")
            .with_quality(0.6)
            .with_dominant_emotion("Happy")
            .with_emotion_score("Happy", 0.8)
    }

    fn phone_mount() -> AccessoryRecord {
        AccessoryRecord::new("A2", "Phone Mount", "Universal", "Universal", "All Cars", 800.0)
            .with_description("Dashboard phone mount")
            .with_category("Electronics")
            .with_sentiment(0.4, "Positive")
            .with_quality(0.4)
            .with_dominant_emotion("Neutral")
    }

    fn profile() -> UserProfile {
        UserProfile::new("Toyota", Some("Camry"), 500.0, 3000.0)
            .with_emotions(["Happy", "Satisfied"])
    }

    #[test]
    fn test_car_score_rules() {
        let cover = camry_cover();
        // brand + model listed
        assert_eq!(car_score(&cover, "toyota", "camry"), 1.0);
        // brand + brand listed
        assert!((car_score(&cover, "toyota", "") - 0.8).abs() < 1e-9);
        // nothing matches
        assert_eq!(car_score(&cover, "honda", "civic"), 0.0);
        // no brand given
        assert_eq!(car_score(&cover, "", "camry"), NEUTRAL_SCORE);

        let mount = phone_mount();
        assert!((car_score(&mount, "toyota", "camry") - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_car_score_is_capped() {
        let record = AccessoryRecord::new("A", "Mat", "Toyota", "Camry", "Toyota Camry, Universal", 100.0);
        assert_eq!(car_score(&record, "toyota", "camry"), 1.0);
    }

    #[test]
    fn test_content_score_blends() {
        assert_eq!(content_score(None, None), 0.5);
        assert!((content_score(None, Some(1.0)) - (0.5 * 0.3 + 0.7)).abs() < 1e-9);
        assert!((content_score(Some(true), None) - 0.75).abs() < 1e-9);
        assert!((content_score(Some(false), Some(0.0)) - 0.25 * 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_quality_score_rescales() {
        let record = camry_cover();
        // (0.6+1)/2 * 0.5 + (0.6+1)/2 * 0.5
        assert!((quality_score(&record) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_preference_score_budget_midpoint() {
        let profile = UserProfile::new("Toyota", Some("Camry"), 1000.0, 3000.0);
        let at_mid = AccessoryRecord::new("A", "Mat", "Toyota", "Camry", "", 2000.0);
        let at_edge = AccessoryRecord::new("B", "Mat", "Toyota", "Camry", "", 1000.0);
        let far_out = AccessoryRecord::new("C", "Mat", "Toyota", "Camry", "", 9000.0);

        assert!((preference_score(&at_mid, &profile, None) - 0.75).abs() < 1e-9);
        assert!((preference_score(&at_edge, &profile, None) - 0.25).abs() < 1e-9);
        assert!((preference_score(&far_out, &profile, None) - 0.25).abs() < 1e-9);
        // category match: (0.15 + 0.7) * 0.5 + 1.0 * 0.5
        assert!((preference_score(&at_mid, &profile, Some(true)) - 0.925).abs() < 1e-9);
    }

    #[test]
    fn test_preference_score_without_range() {
        let profile = UserProfile::new("Toyota", None, 1000.0, 1000.0);
        let record = AccessoryRecord::new("A", "Mat", "Toyota", "Camry", "", 1000.0);
        assert_eq!(preference_score(&record, &profile, None), NEUTRAL_SCORE);
    }

    #[test]
    fn test_emotion_score() {
        let cover = camry_cover();
        let preferred = vec!["Happy".to_string(), "Satisfied".to_string()];
        // 0.6 + 0.4 * (0.8 + 0) / 2
        assert!((emotion_score(&cover, &preferred) - 0.76).abs() < 1e-9);
        assert_eq!(emotion_score(&cover, &[]), NEUTRAL_SCORE);
        // case-sensitive labels
        assert_eq!(emotion_score(&cover, &["happy".to_string()]), 0.0);
    }

    #[test]
    fn test_scorer_bounds_and_weights() {
        let catalog = Catalog::new(vec![camry_cover(), phone_mount()]).unwrap();
        let index = TextIndex::fit(&catalog.documents(), VectorizerConfig::default());
        let scorer = Scorer::new(&catalog, &index);

        let profile = profile().with_query("leather seat");
        let scored = scorer.score(&profile, &[0, 1]);
        assert_eq!(scored.len(), 2);

        for candidate in &scored {
            let s = candidate.scores;
            for value in [
                s.car_score,
                s.content_score,
                s.quality_score,
                s.preference_score,
                s.emotion_score,
                s.final_score,
            ] {
                assert!((0.0..=1.0).contains(&value));
            }
            let expected = s.car_score * 0.25
                + s.content_score * 0.20
                + s.quality_score * 0.25
                + s.preference_score * 0.20
                + s.emotion_score * 0.10;
            assert!((s.final_score - expected).abs() < 1e-9);
        }

        // the query names the seat cover, not the phone mount
        assert!(scored[0].scores.content_score > scored[1].scores.content_score);
    }

    #[test]
    fn test_scorer_without_query_is_neutral_content() {
        let catalog = Catalog::new(vec![camry_cover(), phone_mount()]).unwrap();
        let index = TextIndex::fit(&catalog.documents(), VectorizerConfig::default());
        let scored = Scorer::new(&catalog, &index).score(&profile(), &[1, 0]);

        assert_eq!(scored[0].position, 1);
        assert!(scored.iter().all(|c| c.scores.content_score == NEUTRAL_SCORE));
    }
}
