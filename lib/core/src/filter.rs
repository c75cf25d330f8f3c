// Eligibility filtering: hard constraints an accessory must meet before scoring
use crate::{AccessoryRecord, Catalog, SentimentPreference, UserProfile};
use ahash::AHashSet;
use tracing::debug;

pub trait Filter {
    fn matches(&self, record: &AccessoryRecord) -> bool;
}

#[derive(Debug, Clone)]
pub enum FilterCondition {
    /// Price within [min, max], both ends inclusive
    PriceRange { min: f64, max: f64 },
    QualityAtLeast(f64),
    Sentiment(SentimentPreference),
    /// Compatible-cars text names the model
    ListsModel(String),
    /// Compatible-cars text carries a universal marker
    Universal,
    /// Normalized brand and model equal the user's car. Equality, not
    /// substring containment: "Camry Hybrid" is not an exact "Camry".
    ExactCar { brand: String, model: String },
    /// Brand field or compatible-cars text contains the brand
    BrandMentioned(String),
    And(Vec<FilterCondition>),
    Or(Vec<FilterCondition>),
    Not(Box<FilterCondition>),
}

impl FilterCondition {
    fn matches_record(&self, record: &AccessoryRecord) -> bool {
        match self {
            FilterCondition::PriceRange { min, max } => record.price >= *min && record.price <= *max,
            FilterCondition::QualityAtLeast(threshold) => record.quality_score >= *threshold,
            FilterCondition::Sentiment(preference) => {
                let label = record.sentiment_label.trim();
                match preference {
                    SentimentPreference::Positive => label.eq_ignore_ascii_case("positive"),
                    SentimentPreference::Neutral => {
                        label.eq_ignore_ascii_case("positive") || label.eq_ignore_ascii_case("neutral")
                    }
                    SentimentPreference::Any => true,
                }
            }
            FilterCondition::ListsModel(model) => record.lists_compatible(model),
            FilterCondition::Universal => record.is_universal(),
            FilterCondition::ExactCar { brand, model } => record.is_exact_car(brand, model),
            FilterCondition::BrandMentioned(brand) => {
                !brand.is_empty()
                    && (record.brand_normalized().contains(brand.as_str())
                        || record.lists_compatible(brand))
            }
            FilterCondition::And(conditions) => conditions.iter().all(|c| c.matches_record(record)),
            FilterCondition::Or(conditions) => conditions.iter().any(|c| c.matches_record(record)),
            FilterCondition::Not(condition) => !condition.matches_record(record),
        }
    }
}

impl Filter for FilterCondition {
    fn matches(&self, record: &AccessoryRecord) -> bool {
        self.matches_record(record)
    }
}

/// Candidate pools for the two-section variant, disjoint by construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionPools {
    pub exact_match: Vec<usize>,
    pub compatible: Vec<usize>,
}

/// Narrows the catalog to the positions a profile is eligible for.
///
/// Positions are always returned in catalog order.
pub struct EligibilityFilter<'a> {
    catalog: &'a Catalog,
    profile: &'a UserProfile,
}

impl<'a> EligibilityFilter<'a> {
    pub fn new(catalog: &'a Catalog, profile: &'a UserProfile) -> Self {
        Self { catalog, profile }
    }

    /// Car screening for the single-list mode; `None` when no brand is given
    pub fn car_condition(&self) -> Option<FilterCondition> {
        let brand = self.profile.brand_key();
        if brand.is_empty() {
            return None;
        }
        let model = self.profile.model_key();
        if model.is_empty() {
            return Some(FilterCondition::BrandMentioned(brand));
        }
        Some(FilterCondition::Or(vec![
            FilterCondition::ListsModel(model.clone()),
            FilterCondition::Universal,
            FilterCondition::ExactCar { brand, model },
        ]))
    }

    /// Price, quality and sentiment stages shared by every mode
    pub fn shared_condition(&self) -> FilterCondition {
        FilterCondition::And(vec![
            FilterCondition::PriceRange {
                min: self.profile.budget_min,
                max: self.profile.budget_max,
            },
            FilterCondition::QualityAtLeast(self.profile.quality_threshold),
            FilterCondition::Sentiment(self.profile.sentiment_preference),
        ])
    }

    /// Single-list eligibility: car screening, shared stages, then dedup
    pub fn legacy(&self) -> Vec<usize> {
        let pool = match self.car_condition() {
            Some(car) => self.select(self.catalog.positions(), &car),
            None => self.catalog.positions(),
        };
        debug!(candidates = pool.len(), "after car filtering");
        self.finish(pool)
    }

    /// Two disjoint pools: exact car matches and compatible/universal ones.
    ///
    /// Without a brand there is nothing to match exactly, so every accessory
    /// lands in the compatible pool. Without a model, the exact pool holds
    /// accessories built for the brand and the compatible pool those that are
    /// universal or list the brand.
    pub fn sectioned(&self) -> SectionPools {
        let brand = self.profile.brand_key();
        let model = self.profile.model_key();

        let (exact, cross) = if brand.is_empty() {
            (Vec::new(), self.catalog.positions())
        } else if model.is_empty() {
            let records = self.catalog.records();
            let exact = self
                .catalog
                .positions()
                .into_iter()
                .filter(|&pos| records[pos].brand_normalized() == brand)
                .collect();
            let cross_cond = FilterCondition::Or(vec![
                FilterCondition::Universal,
                FilterCondition::ListsModel(brand),
            ]);
            (exact, self.select(self.catalog.positions(), &cross_cond))
        } else {
            let exact_cond = FilterCondition::ExactCar {
                brand,
                model: model.clone(),
            };
            let cross_cond = FilterCondition::Or(vec![
                FilterCondition::Universal,
                FilterCondition::ListsModel(model),
            ]);
            (
                self.select(self.catalog.positions(), &exact_cond),
                self.select(self.catalog.positions(), &cross_cond),
            )
        };

        let exact_set: AHashSet<usize> = exact.iter().copied().collect();
        let compatible: Vec<usize> = cross
            .into_iter()
            .filter(|pos| !exact_set.contains(pos))
            .collect();
        debug!(
            exact = exact.len(),
            compatible = compatible.len(),
            "section pools before shared stages"
        );

        SectionPools {
            exact_match: self.finish(exact),
            compatible: self.finish(compatible),
        }
    }

    fn select(&self, positions: Vec<usize>, condition: &FilterCondition) -> Vec<usize> {
        let records = self.catalog.records();
        positions
            .into_iter()
            .filter(|&pos| condition.matches(&records[pos]))
            .collect()
    }

    fn finish(&self, pool: Vec<usize>) -> Vec<usize> {
        let filtered = self.select(pool, &self.shared_condition());
        let deduped = dedup_by_name(self.catalog, filtered);
        debug!(candidates = deduped.len(), "after shared filters and dedup");
        deduped
    }
}

/// Keep the first position per normalized accessory name, preserving order
pub fn dedup_by_name(catalog: &Catalog, positions: Vec<usize>) -> Vec<usize> {
    let records = catalog.records();
    let mut seen: AHashSet<&str> = AHashSet::with_capacity(positions.len());
    positions
        .into_iter()
        .filter(|&pos| seen.insert(records[pos].name_normalized()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, brand: &str, model: &str, compat: &str, price: f64) -> AccessoryRecord {
        AccessoryRecord::new(id, name, brand, model, compat, price)
            .with_sentiment(0.6, "Positive")
            .with_quality(0.6)
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            item("1", "Camry Seat Cover", "Toyota", "Camry", "Toyota Camry", 1200.0),
            item("2", "Phone Mount", "Universal", "Universal", "Universal - All Cars", 800.0),
            item("3", "Corolla Floor Mat", "Toyota", "Corolla", "Toyota Corolla, Toyota Camry", 1500.0),
            item("4", "Civic Spoiler", "Honda", "Civic", "Honda Civic", 2500.0),
            item("5", "Camry seat cover", "Toyota", "Camry", "Toyota Camry", 1300.0),
            item("6", "Corolla Grille", "Toyota", "Corolla", "Toyota Corolla", 900.0),
        ])
        .unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile::new("Toyota", Some("Camry"), 500.0, 3000.0)
    }

    #[test]
    fn test_legacy_car_screening() {
        let catalog = catalog();
        let profile = profile();
        let eligible = EligibilityFilter::new(&catalog, &profile).legacy();
        // 5 is a duplicate name of 1, 4 and 6 do not fit a Camry
        assert_eq!(eligible, vec![0, 1, 2]);
    }

    #[test]
    fn test_brand_only_fallback() {
        let catalog = catalog();
        let profile = UserProfile::new("Honda", None, 0.0, 10_000.0);
        let eligible = EligibilityFilter::new(&catalog, &profile).legacy();
        assert_eq!(eligible, vec![3]);
    }

    #[test]
    fn test_empty_brand_passes_everything() {
        let catalog = catalog();
        let profile = UserProfile::new("", None, 0.0, 10_000.0);
        let eligible = EligibilityFilter::new(&catalog, &profile).legacy();
        assert_eq!(eligible, vec![0, 1, 2, 3, 5]);
    }

    #[test]
    fn test_budget_bounds_inclusive() {
        let catalog = catalog();
        let at_bounds = UserProfile::new("Toyota", Some("Camry"), 800.0, 1500.0);
        assert_eq!(EligibilityFilter::new(&catalog, &at_bounds).legacy(), vec![0, 1, 2]);

        let inside = UserProfile::new("Toyota", Some("Camry"), 801.0, 1499.0);
        assert_eq!(EligibilityFilter::new(&catalog, &inside).legacy(), vec![0]);
    }

    #[test]
    fn test_quality_and_sentiment_stages() {
        let records = vec![
            item("1", "A", "Toyota", "Camry", "Toyota Camry", 1000.0).with_sentiment(0.1, "neutral"),
            item("2", "B", "Toyota", "Camry", "Toyota Camry", 1000.0).with_sentiment(-0.5, "Negative"),
            item("3", "C", "Toyota", "Camry", "Toyota Camry", 1000.0).with_sentiment(0.7, "POSITIVE"),
            item("4", "D", "Toyota", "Camry", "Toyota Camry", 1000.0).with_quality(0.1),
        ];
        let catalog = Catalog::new(records).unwrap();

        let positive = profile();
        assert_eq!(EligibilityFilter::new(&catalog, &positive).legacy(), vec![2]);

        let neutral = profile().with_sentiment(SentimentPreference::Neutral);
        assert_eq!(EligibilityFilter::new(&catalog, &neutral).legacy(), vec![0, 2]);

        let any = profile().with_sentiment(SentimentPreference::Any).with_quality_threshold(-1.0);
        assert_eq!(EligibilityFilter::new(&catalog, &any).legacy(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_sectioned_pools_are_disjoint() {
        let catalog = catalog();
        let profile = profile();
        let pools = EligibilityFilter::new(&catalog, &profile).sectioned();

        assert_eq!(pools.exact_match, vec![0]);
        assert_eq!(pools.compatible, vec![1, 2]);
        assert!(pools.exact_match.iter().all(|p| !pools.compatible.contains(p)));
    }

    #[test]
    fn test_exact_car_without_compatible_text() {
        let catalog = Catalog::new(vec![
            item("1", "Mat", "Toyota", "Camry", "", 900.0),
            item("2", "Grille", "Toyota", "Corolla", "Toyota Corolla", 900.0),
            item("3", "Hybrid Mat", "Toyota", "Camry Hybrid", "", 900.0),
        ])
        .unwrap();
        let profile = profile();
        let filter = EligibilityFilter::new(&catalog, &profile);

        assert_eq!(filter.legacy(), vec![0]);

        let pools = filter.sectioned();
        assert_eq!(pools.exact_match, vec![0]);
        assert!(pools.compatible.is_empty());
    }

    #[test]
    fn test_sectioned_without_brand() {
        let catalog = catalog();
        let profile = UserProfile::new("", None, 0.0, 10_000.0);
        let pools = EligibilityFilter::new(&catalog, &profile).sectioned();
        assert!(pools.exact_match.is_empty());
        assert_eq!(pools.compatible, vec![0, 1, 2, 3, 5]);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let catalog = catalog();
        let once = dedup_by_name(&catalog, catalog.positions());
        let twice = dedup_by_name(&catalog, once.clone());
        assert_eq!(once, twice);
        assert_eq!(once, vec![0, 1, 2, 3, 5]);
    }
}
