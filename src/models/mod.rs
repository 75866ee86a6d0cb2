mod fields;
mod form;
mod request;

pub use fields::{Field, FieldKind, FieldSpec, FurnishingStatus, NumberKind, YesNo, FIELDS};
pub use form::{HouseForm, NumericInput};
pub use request::{ErrorBody, InvalidNumberPolicy, PredictionRequest, PredictionResponse};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Price returned by the prediction service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub price: f64,
    pub predicted_at: DateTime<Utc>,
}

impl Prediction {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            predicted_at: Utc::now(),
        }
    }
}
