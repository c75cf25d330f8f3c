use crate::{AccessoryRecord, Error, Result};
use ahash::AHashMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// The immutable accessory catalog.
///
/// Records keep their load order; filters and the text index refer to them
/// by position.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<AccessoryRecord>,
    by_id: AHashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and empty input
    pub fn new(records: Vec<AccessoryRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyCatalog("no accessory records".to_string()));
        }

        let mut by_id = AHashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if by_id.insert(record.id().to_string(), position).is_some() {
                return Err(Error::DuplicateId(record.id().to_string()));
            }
        }

        Ok(Self { records, by_id })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&AccessoryRecord> {
        self.by_id.get(id).map(|&pos| &self.records[pos])
    }

    #[inline]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    #[inline]
    pub fn record(&self, position: usize) -> Option<&AccessoryRecord> {
        self.records.get(position)
    }

    #[inline]
    pub fn records(&self) -> &[AccessoryRecord] {
        &self.records
    }

    /// All positions in catalog order
    pub fn positions(&self) -> Vec<usize> {
        (0..self.records.len()).collect()
    }

    /// Documents for the text index, aligned with positions
    pub fn documents(&self) -> Vec<String> {
        self.records.iter().map(AccessoryRecord::document_text).collect()
    }

    /// Sorted unique categories
    pub fn categories(&self) -> Vec<String> {
        sorted_unique(self.records.iter().map(|r| r.category.as_str()))
    }

    /// Sorted unique car brands, as displayed
    pub fn brands(&self) -> Vec<String> {
        sorted_unique(self.records.iter().map(AccessoryRecord::brand))
    }

    pub fn stats(&self) -> CatalogStats {
        let n = self.records.len() as f64;
        let prices = self.records.iter().map(|r| r.price);
        let qualities = self.records.iter().map(|r| r.quality_score);

        let mut sentiment_distribution = BTreeMap::new();
        for record in &self.records {
            *sentiment_distribution
                .entry(record.sentiment_label.clone())
                .or_insert(0usize) += 1;
        }

        CatalogStats {
            total_accessories: self.records.len(),
            total_brands: self.brands().len(),
            total_categories: self.categories().len(),
            price_range: RangeStats::compute(prices, n),
            sentiment_distribution,
            quality_stats: RangeStats::compute(qualities, n),
        }
    }
}

fn sorted_unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Catalog summary exposed by the API
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub total_accessories: usize,
    pub total_brands: usize,
    pub total_categories: usize,
    pub price_range: RangeStats,
    pub sentiment_distribution: BTreeMap<String, usize>,
    pub quality_stats: RangeStats,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RangeStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl RangeStats {
    fn compute(values: impl Iterator<Item = f64>, n: f64) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        if n == 0.0 {
            return Self { min: 0.0, max: 0.0, mean: 0.0 };
        }
        Self { min, max, mean: sum / n }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, brand: &str, category: &str, price: f64, label: &str) -> AccessoryRecord {
        AccessoryRecord::new(id, format!("Item {}", id), brand, "Model", "", price)
            .with_category(category)
            .with_sentiment(0.5, label)
    }

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new(vec![
            record("1", "Toyota", "Interior", 100.0, "Positive"),
            record("2", "Honda", "Safety", 300.0, "Neutral"),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.position("2"), Some(1));
        assert_eq!(catalog.get("1").unwrap().brand(), "Toyota");
        assert!(catalog.get("3").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::new(vec![
            record("1", "Toyota", "Interior", 100.0, "Positive"),
            record("1", "Honda", "Safety", 300.0, "Neutral"),
        ]);
        assert!(matches!(result, Err(Error::DuplicateId(id)) if id == "1"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(Catalog::new(Vec::new()), Err(Error::EmptyCatalog(_))));
    }

    #[test]
    fn test_stats_and_listings() {
        let catalog = Catalog::new(vec![
            record("1", "Toyota", "Interior", 100.0, "Positive"),
            record("2", "Honda", "Safety", 300.0, "Neutral"),
            record("3", "Toyota", "Interior", 200.0, "Positive"),
        ])
        .unwrap();

        assert_eq!(catalog.brands(), vec!["Honda", "Toyota"]);
        assert_eq!(catalog.categories(), vec!["Interior", "Safety"]);

        let stats = catalog.stats();
        assert_eq!(stats.total_accessories, 3);
        assert_eq!(stats.total_brands, 2);
        assert_eq!(stats.price_range.min, 100.0);
        assert_eq!(stats.price_range.max, 300.0);
        assert!((stats.price_range.mean - 200.0).abs() < 1e-9);
        assert_eq!(stats.sentiment_distribution.get("Positive"), Some(&2));
    }
}
