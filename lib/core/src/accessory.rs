use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Substrings in the compatible-cars text that mark an accessory as fitting every car
pub const UNIVERSAL_MARKERS: [&str; 2] = ["universal", "all cars"];

/// Emotion labels the upstream analysis pipeline scores per accessory
pub const EMOTION_LABELS: [&str; 5] = ["Happy", "Satisfied", "Disappointed", "Angry", "Neutral"];

/// Lower-case, trim and collapse inner whitespace.
///
/// Every normalized field on [`AccessoryRecord`] goes through this so that
/// substring matching against user input is case-insensitive.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Review aspects scored by the upstream sentiment pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Aspect {
    Quality,
    Durability,
    Installation,
    Design,
    Compatibility,
    Value,
    Comfort,
    Performance,
}

impl Aspect {
    pub const ALL: [Aspect; 8] = [
        Aspect::Quality,
        Aspect::Durability,
        Aspect::Installation,
        Aspect::Design,
        Aspect::Compatibility,
        Aspect::Value,
        Aspect::Comfort,
        Aspect::Performance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Aspect::Quality => "Quality",
            Aspect::Durability => "Durability",
            Aspect::Installation => "Installation",
            Aspect::Design => "Design",
            Aspect::Compatibility => "Compatibility",
            Aspect::Value => "Value",
            Aspect::Comfort => "Comfort",
            Aspect::Performance => "Performance",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aspect sentiment in [-1, 1] and how many reviews mentioned it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AspectScore {
    pub score: f64,
    pub mentions: u32,
}

/// A single catalog accessory with its precomputed review features.
///
/// Display strings and their normalized copies are private so the two can
/// only be set together, through [`AccessoryRecord::new`].
#[derive(Debug, Clone, Serialize)]
pub struct AccessoryRecord {
    id: String,
    name: String,
    brand: String,
    model: String,
    compatible_cars: String,
    #[serde(skip_serializing)]
    name_normalized: String,
    #[serde(skip_serializing)]
    brand_normalized: String,
    #[serde(skip_serializing)]
    model_normalized: String,
    #[serde(skip_serializing)]
    compatible_cars_normalized: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub sentiment_score: f64,
    pub sentiment_label: String,
    pub quality_score: f64,
    pub aspects: BTreeMap<Aspect, AspectScore>,
    pub dominant_emotion: String,
    /// Emotion label -> score. Labels the feature table did not score are absent.
    pub emotion_scores: BTreeMap<String, f64>,
    pub key_strengths: String,
    pub key_weaknesses: String,
    pub key_phrases: String,
    pub top_reviews: String,
}

impl AccessoryRecord {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
        model: impl Into<String>,
        compatible_cars: impl Into<String>,
        price: f64,
    ) -> Self {
        let name = name.into();
        let brand = brand.into();
        let model = model.into();
        let compatible_cars = compatible_cars.into();
        Self {
            id: id.into(),
            name_normalized: normalize_text(&name),
            brand_normalized: normalize_text(&brand),
            model_normalized: normalize_text(&model),
            compatible_cars_normalized: normalize_text(&compatible_cars),
            name,
            brand,
            model,
            compatible_cars,
            description: String::new(),
            price,
            category: String::new(),
            sentiment_score: 0.0,
            sentiment_label: "Neutral".to_string(),
            quality_score: 0.0,
            aspects: BTreeMap::new(),
            dominant_emotion: String::new(),
            emotion_scores: BTreeMap::new(),
            key_strengths: String::new(),
            key_weaknesses: String::new(),
            key_phrases: String::new(),
            top_reviews: String::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_sentiment(mut self, score: f64, label: impl Into<String>) -> Self {
        self.sentiment_score = score;
        self.sentiment_label = label.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_quality(mut self, quality_score: f64) -> Self {
        self.quality_score = quality_score;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_dominant_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.dominant_emotion = emotion.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_emotion_score(mut self, label: impl Into<String>, score: f64) -> Self {
        self.emotion_scores.insert(label.into(), score);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_aspect(mut self, aspect: Aspect, score: f64, mentions: u32) -> Self {
        self.aspects.insert(aspect, AspectScore { score, mentions });
        self
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    #[inline]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[inline]
    pub fn compatible_cars(&self) -> &str {
        &self.compatible_cars
    }

    #[inline]
    pub fn name_normalized(&self) -> &str {
        &self.name_normalized
    }

    #[inline]
    pub fn brand_normalized(&self) -> &str {
        &self.brand_normalized
    }

    #[inline]
    pub fn model_normalized(&self) -> &str {
        &self.model_normalized
    }

    #[inline]
    pub fn compatible_cars_normalized(&self) -> &str {
        &self.compatible_cars_normalized
    }

    /// Compatible-cars text carries a universal marker
    #[inline]
    pub fn is_universal(&self) -> bool {
        UNIVERSAL_MARKERS
            .iter()
            .any(|marker| self.compatible_cars_normalized.contains(marker))
    }

    /// Compatible-cars text contains `needle` (already normalized)
    #[inline]
    pub fn lists_compatible(&self, needle: &str) -> bool {
        !needle.is_empty() && self.compatible_cars_normalized.contains(needle)
    }

    /// Built for exactly this car: normalized brand and model both equal
    #[inline]
    pub fn is_exact_car(&self, brand: &str, model: &str) -> bool {
        !brand.is_empty()
            && !model.is_empty()
            && self.brand_normalized == brand
            && self.model_normalized == model
    }

    /// Score recorded for an emotion label, if the feature table had one
    #[inline]
    pub fn emotion_score(&self, label: &str) -> Option<f64> {
        self.emotion_scores.get(label).copied()
    }

    /// Text fed to the TF-IDF index: description followed by name
    pub fn document_text(&self) -> String {
        format!("{} {}", self.description, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_fields_follow_display_fields() {
        let record = AccessoryRecord::new(
            "A1",
            "  Premium   Seat Cover ",
            "Toyota",
            "Camry ",
            "Toyota Camry, Toyota Corolla",
            1200.0,
        );

        assert_eq!(record.name(), "  Premium   Seat Cover ");
        assert_eq!(record.name_normalized(), "premium seat cover");
        assert_eq!(record.brand_normalized(), "toyota");
        assert_eq!(record.model_normalized(), "camry");
        assert_eq!(record.compatible_cars_normalized(), "toyota camry, toyota corolla");
    }

    #[test]
    fn test_universal_markers() {
        let universal = AccessoryRecord::new("U1", "Phone Mount", "Universal", "Universal", "Universal", 500.0);
        let all_cars = AccessoryRecord::new("U2", "Air Freshener", "Generic", "Any", "Fits All Cars", 150.0);
        let specific = AccessoryRecord::new("S1", "Floor Mat", "Honda", "City", "Honda City", 900.0);

        assert!(universal.is_universal());
        assert!(all_cars.is_universal());
        assert!(!specific.is_universal());
    }

    #[test]
    fn test_exact_car_requires_both_fields() {
        let record = AccessoryRecord::new("A1", "Mat", "Toyota", "Camry", "Toyota Camry", 100.0);

        assert!(record.is_exact_car("toyota", "camry"));
        assert!(!record.is_exact_car("toyota", "corolla"));
        assert!(!record.is_exact_car("toyota", ""));
        assert!(!record.is_exact_car("", "camry"));
    }

    #[test]
    fn test_lists_compatible_ignores_empty_needle() {
        let record = AccessoryRecord::new("A1", "Mat", "Toyota", "Corolla", "Toyota Corolla, Toyota Camry", 100.0);

        assert!(record.lists_compatible("camry"));
        assert!(!record.lists_compatible("civic"));
        assert!(!record.lists_compatible(""));
    }

    #[test]
    fn test_missing_emotion_score_is_absent() {
        let record = AccessoryRecord::new("A1", "Mat", "Toyota", "Camry", "Toyota Camry", 100.0)
            .with_emotion_score("Happy", 0.8);

        assert_eq!(record.emotion_score("Happy"), Some(0.8));
        assert_eq!(record.emotion_score("Angry"), None);
    }
}
