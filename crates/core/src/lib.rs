pub mod behavior;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod engagement;
pub mod errors;
pub mod recs;
pub mod search;
pub mod session;

pub use behavior::BehaviorTracker;
pub use catalog::{CatalogError, CatalogProvider, StaticCatalog};
pub use config::{AppConfig, ConfigOverrides, EngineConfig};
pub use domain::behavior::{BehaviorProfile, ClickRecord, PurchaseStats, SearchRecord, ViewStats};
pub use domain::product::{Product, ProductId};
pub use domain::search::{
    Availability, FilterPatch, PriceRange, SearchFilters, SearchState, SortBy,
};
pub use engagement::{
    EngagementEvent, EngagementSignal, EngagementSink, NoopEngagementSink, RecordingEngagementSink,
};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use recs::{
    ModelState, RecommendationItem, RecommendationReason, RecommendationSet, SimilarityScorer,
    SimilarityWeights,
};
pub use search::SuggestionEngine;
pub use session::{BehaviorSnapshot, SearchSnapshot, SessionConfig, SessionEngine};
