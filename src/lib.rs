//! House price prediction form.
//!
//! A [`FormController`] keeps the house features typed by the user, renders
//! them as a [`view::FormView`], and submits them to a prediction service
//! through a [`PricePredictor`].

pub mod controller;
pub mod error;
pub mod models;
pub mod notify;
pub mod predictors;
pub mod view;

pub use controller::{FormController, SubmitPhase};
pub use error::{ConfigError, FormError, PredictError};
pub use models::{Field, HouseForm, InvalidNumberPolicy, Prediction};
pub use notify::{ConsoleNotifier, Notifier, RecordingNotifier};
pub use predictors::{HttpPredictor, PredictorConfig, PricePredictor};
