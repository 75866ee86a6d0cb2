use crate::error::{ConfigError, PredictError};
use crate::models::{ErrorBody, Prediction, PredictionRequest, PredictionResponse};
use crate::predictors::traits::PricePredictor;
use crate::predictors::types::PredictorConfig;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Prediction service reached over HTTP
pub struct HttpPredictor {
    client: Client,
    endpoint: String,
}

impl HttpPredictor {
    /// Create a predictor for the configured service
    pub fn new(config: &PredictorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PricePredictor for HttpPredictor {
    async fn predict(&self, request: &PredictionRequest) -> Result<Prediction, PredictError> {
        debug!("POST {} with {:?}", self.endpoint, request);

        // `.json()` sets Content-Type: application/json
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(PredictError::Network)?;

        let status = response.status();
        let body = response.bytes().await.map_err(PredictError::Network)?;
        debug!("Prediction service answered {} ({} bytes)", status, body.len());

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.message());
            warn!("Prediction service returned status: {}", status);
            return Err(PredictError::Remote {
                status: status.as_u16(),
                detail,
            });
        }

        let parsed: PredictionResponse =
            serde_json::from_slice(&body).map_err(|e| PredictError::Decode(e.to_string()))?;

        info!("Predicted price: {}", parsed.predicted_price);
        Ok(Prediction::new(parsed.predicted_price))
    }

    fn source_name(&self) -> &'static str {
        "HTTP"
    }
}
