// Two-section output: accessories built for the user's exact car, and those
// that fit it through compatibility listings or a universal marker.
use crate::explain::user_car_label;
use crate::result::RecommendationResult;
use carfit_core::UserProfile;

pub const EXACT_MATCH_TITLE: &str = "Exact Match for Your Car";
pub const COMPATIBLE_TITLE: &str = "Compatible & Universal Accessories";

#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub title: &'static str,
    pub description: String,
    pub result: RecommendationResult<'a>,
}

/// Exact-match and compatible results over disjoint candidate pools
#[derive(Debug, Clone)]
pub struct SectionedResult<'a> {
    pub exact_match: Section<'a>,
    pub compatible: Section<'a>,
}

impl<'a> SectionedResult<'a> {
    pub fn new(
        profile: &UserProfile,
        exact_match: RecommendationResult<'a>,
        compatible: RecommendationResult<'a>,
    ) -> Self {
        let car = match user_car_label(profile) {
            label if label.is_empty() => "car".to_string(),
            label => label,
        };
        Self {
            exact_match: Section {
                title: EXACT_MATCH_TITLE,
                description: format!("Accessories made specifically for your {}", car),
                result: exact_match,
            },
            compatible: Section {
                title: COMPATIBLE_TITLE,
                description: format!(
                    "Universal accessories and accessories for other models that also fit your {}",
                    car
                ),
                result: compatible,
            },
        }
    }

    /// Items across both sections
    pub fn total(&self) -> usize {
        self.exact_match.result.len() + self.compatible.result.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
