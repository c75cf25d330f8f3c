//! Human-readable explanations for ranked accessories
//!
//! An explanation is a list of fragments joined by [`FRAGMENT_SEPARATOR`].
//! The compatibility fragment, when present, always comes first so a user
//! sees up front whether an accessory was built for a different car.

use crate::scorer::ScoredCandidate;
use carfit_core::{AccessoryRecord, UserProfile};

pub const FRAGMENT_SEPARATOR: &str = " | ";

/// Dominant emotions worth calling out
const POSITIVE_EMOTIONS: [&str; 2] = ["Happy", "Satisfied"];

/// How an accessory relates to the user's car
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    /// Compatible-cars text carries a universal marker
    Universal,
    /// Built for another model but lists the user's model as compatible
    CrossCompatible,
    /// Neither of the above; the car sub-score decides the wording
    Direct,
}

impl Compatibility {
    pub fn of(record: &AccessoryRecord, profile: &UserProfile) -> Self {
        if record.is_universal() {
            return Compatibility::Universal;
        }
        let model = profile.model_key();
        if !model.is_empty() && !record.model_normalized().contains(&model) && record.lists_compatible(&model) {
            return Compatibility::CrossCompatible;
        }
        Compatibility::Direct
    }
}

/// "Brand Model" as the user typed it, empty when no car was given
pub fn user_car_label(profile: &UserProfile) -> String {
    [profile.car_brand.trim(), profile.model_display().trim()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rupee amount with thousands separators and no decimals, e.g. `₹1,200`
pub fn format_price(price: f64) -> String {
    let rounded = format!("{:.0}", price);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("₹{}{}", sign, grouped)
}

fn compatibility_fragment(candidate: &ScoredCandidate<'_>, profile: &UserProfile, car: &str) -> Option<String> {
    let record = candidate.record;
    match Compatibility::of(record, profile) {
        Compatibility::Universal => {
            Some("🌐 Universal accessory - Compatible with all car models including yours".to_string())
        }
        Compatibility::CrossCompatible => Some(format!(
            "🔄 Originally for {} {}, but ALSO compatible with your {}",
            record.brand(),
            record.model(),
            car
        )),
        Compatibility::Direct if car.is_empty() => None,
        Compatibility::Direct => {
            let score = candidate.scores.car_score;
            if score > 0.7 {
                Some(format!("✅ Perfect fit for your {}", car))
            } else if score > 0.4 {
                Some(format!("✓ Compatible with your {}", car))
            } else {
                None
            }
        }
    }
}

/// Build the explanation string for one selected candidate
pub fn explain(candidate: &ScoredCandidate<'_>, profile: &UserProfile) -> String {
    let record = candidate.record;
    let car = user_car_label(profile);
    let mut fragments: Vec<String> = Vec::with_capacity(6);

    if let Some(fragment) = compatibility_fragment(candidate, profile, &car) {
        fragments.push(fragment);
    }

    if record.quality_score > 0.7 {
        fragments.push(format!("⭐ Excellent quality (score: {:.2})", record.quality_score));
    } else if record.quality_score > 0.5 {
        fragments.push(format!("👍 Good quality (score: {:.2})", record.quality_score));
    }

    if record.sentiment_label == "Positive" {
        let percent = ((record.sentiment_score + 1.0) * 50.0).trunc() as i64;
        fragments.push(format!("😊 {}% positive reviews", percent));
    }

    if profile.preferred_categories.iter().any(|c| *c == record.category) {
        fragments.push(format!("🎯 Matches your preference: {}", record.category));
    }

    fragments.push(format!("💰 {}", format_price(record.price)));

    if POSITIVE_EMOTIONS.contains(&record.dominant_emotion.as_str()) {
        fragments.push(format!("💚 Customers are {}", record.dominant_emotion.to_lowercase()));
    }

    fragments.join(FRAGMENT_SEPARATOR)
}

/// Longer compatibility note for accessories not built for the user's model.
///
/// Returns `None` when no model was given or the accessory's own model
/// already names the user's model.
pub fn compatibility_note(record: &AccessoryRecord, profile: &UserProfile) -> Option<String> {
    let model = profile.model_key();
    if model.is_empty() || record.model_normalized().contains(&model) {
        return None;
    }
    let car = user_car_label(profile);
    if record.lists_compatible(&model) {
        Some(format!(
            "⚠️ NOTE: This accessory is originally designed for {} {}, but it is ALSO COMPATIBLE with your {}. You can safely use this accessory!",
            record.brand(),
            record.model(),
            car
        ))
    } else if record.is_universal() {
        Some(format!(
            "✅ Universal accessory - Designed to fit multiple car models including your {}",
            car
        ))
    } else {
        None
    }
}
