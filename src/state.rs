use crate::db::EntryStore;
use crate::domain::questionnaire::ScoringConfig;
use crate::services::predictor::Predictor;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
    pub predictor: Arc<dyn Predictor>,
    pub scoring: ScoringConfig,
}

pub type SharedState = Arc<AppState>;
