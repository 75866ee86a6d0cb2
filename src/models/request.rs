use crate::error::PredictError;
use crate::models::fields::{FurnishingStatus, YesNo};
use crate::models::form::{HouseForm, NumericInput};
use serde::{Deserialize, Serialize};

/// What to do with numeric text that does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidNumberPolicy {
    /// Refuse to submit and name the offending fields.
    #[default]
    Reject,
    /// Send the field anyway; it goes over the wire as `null`.
    Forward,
}

/// Body of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub area: Option<f64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<f64>,
    pub stories: Option<f64>,
    pub mainroad: YesNo,
    pub guestroom: YesNo,
    pub basement: YesNo,
    pub hotwaterheating: YesNo,
    pub airconditioning: YesNo,
    pub parking: Option<i64>,
    pub prefarea: YesNo,
    pub furnishingstatus: FurnishingStatus,
}

impl PredictionRequest {
    pub fn from_form(form: &HouseForm, policy: InvalidNumberPolicy) -> Result<Self, PredictError> {
        if policy == InvalidNumberPolicy::Reject {
            let fields = form.invalid_numbers();
            if !fields.is_empty() {
                return Err(PredictError::InvalidInput { fields });
            }
        }

        Ok(Self {
            area: form.area.value(),
            bedrooms: integer(&form.bedrooms),
            bathrooms: form.bathrooms.value(),
            stories: form.stories.value(),
            mainroad: form.mainroad,
            guestroom: form.guestroom,
            basement: form.basement,
            hotwaterheating: form.hotwaterheating,
            airconditioning: form.airconditioning,
            parking: integer(&form.parking),
            prefarea: form.prefarea,
            furnishingstatus: form.furnishingstatus,
        })
    }
}

// Integer inputs are already truncated at parse time.
fn integer(input: &NumericInput) -> Option<i64> {
    input.value().map(|n| n as i64)
}

/// Success body returned by the service
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
}

/// Failure body; `detail` is a message or a structured validation report
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Detail as user-facing text, `None` when missing or empty
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) if text.trim().is_empty() => None,
            serde_json::Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}
