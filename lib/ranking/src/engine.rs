use crate::config::EngineConfig;
use crate::result::RecommendationResult;
use crate::scorer::Scorer;
use crate::sections::SectionedResult;
use crate::selector::select_top_k;
use carfit_core::{Catalog, EligibilityFilter, Error, Result, TextIndex, UserProfile};
use tracing::debug;

/// Immutable catalog plus text index, built once and shared by every request.
///
/// Both entry points are pure functions of the profile and the engine state;
/// identical inputs always produce identical rankings.
pub struct RecommendationEngine {
    catalog: Catalog,
    index: TextIndex,
    config: EngineConfig,
}

impl RecommendationEngine {
    /// The index must hold one vector per catalog position
    pub fn new(catalog: Catalog, index: TextIndex) -> Result<Self> {
        if index.len() != catalog.len() {
            return Err(Error::InvalidConfig(format!(
                "text index has {} vectors for {} accessories",
                index.len(),
                catalog.len()
            )));
        }
        Ok(Self {
            catalog,
            index,
            config: EngineConfig::default(),
        })
    }

    pub fn with_config(mut self, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn index(&self) -> &TextIndex {
        &self.index
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Single ranked list over every accessory that fits the user's car
    pub fn recommend(&self, profile: &UserProfile, top_k: usize, diversity_factor: f64) -> RecommendationResult<'_> {
        let eligible = EligibilityFilter::new(&self.catalog, profile).legacy();
        debug!(eligible = eligible.len(), top_k, "ranking single list");
        self.rank(profile, &eligible, top_k, diversity_factor)
    }

    /// Exact-match and compatible sections, each ranked and cut independently
    pub fn recommend_sectioned(
        &self,
        profile: &UserProfile,
        exact_match_count: usize,
        compatible_count: usize,
    ) -> SectionedResult<'_> {
        let pools = EligibilityFilter::new(&self.catalog, profile).sectioned();
        debug!(
            exact = pools.exact_match.len(),
            compatible = pools.compatible.len(),
            "ranking sections"
        );
        let diversity_factor = self.config.diversity_factor;
        let exact_match = self.rank(profile, &pools.exact_match, exact_match_count, diversity_factor);
        let compatible = self.rank(profile, &pools.compatible, compatible_count, diversity_factor);
        SectionedResult::new(profile, exact_match, compatible)
    }

    fn rank(
        &self,
        profile: &UserProfile,
        positions: &[usize],
        top_k: usize,
        diversity_factor: f64,
    ) -> RecommendationResult<'_> {
        if positions.is_empty() {
            return RecommendationResult::default();
        }
        let scored = Scorer::new(&self.catalog, &self.index).score(profile, positions);
        let selected = select_top_k(scored, top_k, diversity_factor);
        RecommendationResult::from_selected(selected, profile)
    }
}
