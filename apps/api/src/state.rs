use std::sync::Arc;

use crate::config::Config;
use crate::extraction::name::EntityRecognizer;
use crate::extraction::skills::SkillsDb;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup; read-only afterwards.
    pub skills: Arc<SkillsDb>,
    /// Pluggable PERSON recognizer. Default: HeuristicRecognizer.
    pub recognizer: Arc<dyn EntityRecognizer>,
}
