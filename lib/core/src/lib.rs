//! # carfit Core
//!
//! Core library for the carfit accessory recommender.
//!
//! This crate provides the data model and the read-only structures every
//! request works against:
//!
//! - [`AccessoryRecord`] - One catalog accessory with its precomputed review features
//! - [`Catalog`] - Immutable catalog store, addressed by position or id
//! - [`TextIndex`] - TF-IDF vectors over accessory names and descriptions
//! - [`EligibilityFilter`] - Hard constraints (car, budget, quality, sentiment, dedup)
//! - [`UserProfile`] - Per-request car and preference description
//!
//! ## Example
//!
//! ```rust
//! use carfit_core::{AccessoryRecord, Catalog, EligibilityFilter, UserProfile};
//!
//! let record = AccessoryRecord::new("A1", "Seat Cover", "Toyota", "Camry", "Toyota Camry", 1200.0)
//!     .with_sentiment(0.6, "Positive")
//!     .with_quality(0.6);
//! let catalog = Catalog::new(vec![record]).unwrap();
//!
//! let profile = UserProfile::new("Toyota", Some("Camry"), 500.0, 3000.0);
//! let eligible = EligibilityFilter::new(&catalog, &profile).legacy();
//! assert_eq!(eligible, vec![0]);
//! ```

pub mod accessory;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod profile;
pub mod text;
pub mod vector;

pub use accessory::{normalize_text, Aspect, AspectScore, AccessoryRecord, EMOTION_LABELS, UNIVERSAL_MARKERS};
pub use catalog::{Catalog, CatalogStats, RangeStats};
pub use error::{Error, Result};
pub use filter::{dedup_by_name, EligibilityFilter, Filter, FilterCondition, SectionPools};
pub use profile::{SentimentPreference, UserProfile};
pub use text::{TextIndex, VectorizerConfig, Vocabulary};
pub use vector::SparseVector;
