//! Suggestion engine for approximating a lexical item the player has in mind.
//!
//! A read-only [`EmbeddingSpace`] is shared by any number of [`Session`]s.
//! Each session offers a diverse starting round, then alternates between
//! recording the player's pick and offering the pick's nearest neighbours
//! plus a couple of decoys, until the player spots their target and
//! [`Session::reveal`]s it.

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod error;
pub mod random;
pub mod ranking;
pub mod session;
pub mod space;
pub mod views;

pub use analytics::RevealAnalytics;
pub use catalog::LoadedModel;
pub use catalog::ModelCatalog;
pub use catalog::ModelSummary;
pub use config::Config;
pub use config::EngineConfig;
pub use config::ModelSpec;
pub use error::EngineError;
pub use error::Result;
pub use random::RandomSource;
pub use ranking::rank_by_similarity;
pub use session::Session;
pub use session::SessionPhase;
pub use space::EmbeddingSpace;
pub use space::display_label;
pub use views::DoneView;
pub use views::StartView;
pub use views::SuggestionsView;
pub use views::UndoView;
