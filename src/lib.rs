//! # carfit
//!
//! Explainable vehicle accessory recommendations.
//!
//! carfit ranks a fixed catalog of accessories against a user's car, budget
//! and quality/sentiment/emotion preferences, and explains every pick.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! carfit --catalog ./data/accessories_with_advanced_sentiment.csv --http-port 8000
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use carfit::prelude::*;
//!
//! let loaded = StorageManager::new("./data/accessories_with_advanced_sentiment.csv")
//!     .with_vocabulary("./data/tfidf_vocabulary.json")
//!     .load()
//!     .unwrap();
//! let engine = RecommendationEngine::new(loaded.catalog, loaded.index).unwrap();
//!
//! let profile = UserProfile::new("Toyota", Some("Camry"), 500.0, 3000.0)
//!     .with_emotions(["Happy", "Satisfied"]);
//! for item in &engine.recommend(&profile, 6, 0.3).items {
//!     println!("{} - {}", item.record().name(), item.explanation);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `carfit-core` - Accessory records, catalog store, TF-IDF index, eligibility filter
//! - `carfit-storage` - Feature table loader and vocabulary artifact
//! - `carfit-ranking` - Scorer, selector, explanations, sectioned results
//! - `carfit-api` - REST API

// Re-export core types
pub use carfit_core::{
    AccessoryRecord, Catalog, CatalogStats, EligibilityFilter, Error, Result, SentimentPreference,
    SparseVector, TextIndex, UserProfile, VectorizerConfig, Vocabulary,
};

// Re-export storage
pub use carfit_storage::{load_catalog, LoadedCatalog, StorageManager, VocabularyArtifact};

// Re-export ranking
pub use carfit_ranking::{
    EngineConfig, RecommendationEngine, RecommendationResult, RecommendedItem, ScoreBreakdown, SectionedResult,
};

// Re-export API
pub use carfit_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AccessoryRecord, Catalog, EngineConfig, Error, RecommendationEngine, RecommendationResult, Result,
        SectionedResult, SentimentPreference, StorageManager, UserProfile,
    };
}
