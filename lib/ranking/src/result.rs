use crate::explain::explain;
use crate::scorer::{ScoreBreakdown, ScoredCandidate};
use carfit_core::{AccessoryRecord, UserProfile};
use std::collections::BTreeMap;

/// A selected accessory with its explanation
#[derive(Debug, Clone)]
pub struct RecommendedItem<'a> {
    pub candidate: ScoredCandidate<'a>,
    pub explanation: String,
}

impl<'a> RecommendedItem<'a> {
    #[inline]
    pub fn record(&self) -> &'a AccessoryRecord {
        self.candidate.record
    }

    #[inline]
    pub fn final_score(&self) -> f64 {
        self.candidate.final_score()
    }
}

/// Ranked, explained shortlist, best first
#[derive(Debug, Clone, Default)]
pub struct RecommendationResult<'a> {
    pub items: Vec<RecommendedItem<'a>>,
    /// Accessory id -> sub-scores of every returned item
    pub score_breakdown: BTreeMap<String, ScoreBreakdown>,
}

impl<'a> RecommendationResult<'a> {
    /// Attach explanations to already selected candidates
    pub fn from_selected(selected: Vec<ScoredCandidate<'a>>, profile: &UserProfile) -> Self {
        let score_breakdown = selected
            .iter()
            .map(|c| (c.record.id().to_string(), c.scores))
            .collect();
        let items = selected
            .into_iter()
            .map(|candidate| RecommendedItem {
                explanation: explain(&candidate, profile),
                candidate,
            })
            .collect();
        Self {
            items,
            score_breakdown,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.items.iter().map(|item| item.record().id()).collect()
    }
}
