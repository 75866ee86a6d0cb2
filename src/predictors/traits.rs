use crate::error::PredictError;
use crate::models::{Prediction, PredictionRequest};
use async_trait::async_trait;

/// Common trait for anything that can price a house
/// The controller only talks to this, so tests can swap the HTTP service out
#[async_trait]
pub trait PricePredictor: Send + Sync {
    /// Ask for a price for the given house features
    async fn predict(&self, request: &PredictionRequest) -> Result<Prediction, PredictError>;

    /// Get the name of the prediction source
    fn source_name(&self) -> &'static str;
}
