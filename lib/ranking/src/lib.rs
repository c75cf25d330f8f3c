//! # carfit Ranking
//!
//! Multi-factor ranking of eligible accessories with per-item explanations.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Eligibility │────>│   Scorer    │────>│  Selector   │────>│  Explain    │
//! │  (filter)   │     │ (5 factors) │     │  (top k)    │     │ (fragments) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! The sectioned entry point runs the same pipeline twice, once over the
//! exact-match pool and once over the compatible pool.
//!
//! ## Example
//!
//! ```rust
//! use carfit_core::{AccessoryRecord, Catalog, TextIndex, UserProfile, VectorizerConfig};
//! use carfit_ranking::RecommendationEngine;
//!
//! let record = AccessoryRecord::new("A1", "Seat Cover", "Toyota", "Camry", "Toyota Camry", 1200.0)
//!     .with_sentiment(0.6, "Positive")
//!     .with_quality(0.6);
//! let catalog = Catalog::new(vec![record]).unwrap();
//! let index = TextIndex::fit(&catalog.documents(), VectorizerConfig::default());
//! let engine = RecommendationEngine::new(catalog, index).unwrap();
//!
//! let profile = UserProfile::new("Toyota", Some("Camry"), 500.0, 3000.0);
//! let result = engine.recommend(&profile, 6, 0.3);
//! assert_eq!(result.ids(), vec!["A1"]);
//! assert!(result.items[0].explanation.contains("₹1,200"));
//! ```

pub mod config;
pub mod engine;
pub mod explain;
pub mod result;
pub mod scorer;
pub mod sections;
pub mod selector;

pub use config::EngineConfig;
pub use engine::RecommendationEngine;
pub use explain::{compatibility_note, explain, format_price, user_car_label, Compatibility};
pub use result::{RecommendationResult, RecommendedItem};
pub use scorer::{ScoreBreakdown, ScoredCandidate, Scorer};
pub use sections::{Section, SectionedResult, COMPATIBLE_TITLE, EXACT_MATCH_TITLE};
pub use selector::select_top_k;
