use crate::error::{FormError, PredictError};
use crate::models::{Field, HouseForm, InvalidNumberPolicy, Prediction, PredictionRequest};
use crate::notify::Notifier;
use crate::predictors::PricePredictor;
use crate::view::FormView;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Where the controller is in a submission
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded { price: f64 },
    Failed { message: String },
}

impl SubmitPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmitPhase::Submitting)
    }
}

/// Owns the form, renders it, and submits it for a price
pub struct FormController<P, N> {
    form: HouseForm,
    predictor: P,
    notifier: N,
    policy: InvalidNumberPolicy,
    prediction: Option<Prediction>,
    phase: watch::Sender<SubmitPhase>,
}

impl<P, N> FormController<P, N>
where
    P: PricePredictor,
    N: Notifier,
{
    pub fn new(predictor: P, notifier: N) -> Self {
        let (phase, _) = watch::channel(SubmitPhase::Idle);
        Self {
            form: HouseForm::default(),
            predictor,
            notifier,
            policy: InvalidNumberPolicy::default(),
            prediction: None,
            phase,
        }
    }

    pub fn with_policy(mut self, policy: InvalidNumberPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), FormError> {
        self.form.set(field, value)?;
        debug!("{} = {:?}", field, value);
        Ok(())
    }

    pub fn set_field_by_name(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let field = name.parse::<Field>()?;
        self.set_field(field, value)
    }

    /// Submit the form for a price.
    ///
    /// Failures are shown through the notifier and also returned. The
    /// loading phase is cleared on every exit path, including when this
    /// future is dropped before it completes.
    pub async fn submit(&mut self) -> Result<Prediction, PredictError> {
        let loading = LoadingGuard::start(&self.phase);
        self.prediction = None;

        let outcome = match PredictionRequest::from_form(&self.form, self.policy) {
            Ok(request) => {
                info!("Requesting price from {}", self.predictor.source_name());
                self.predictor.predict(&request).await
            }
            Err(err) => Err(err),
        };

        match outcome {
            Ok(prediction) => {
                self.prediction = Some(prediction.clone());
                loading.finish(SubmitPhase::Succeeded {
                    price: prediction.price,
                });
                Ok(prediction)
            }
            Err(err) => {
                let message = err.user_message();
                warn!("Prediction failed: {}", message);
                self.notifier.notify(&message);
                loading.finish(SubmitPhase::Failed { message });
                Err(err)
            }
        }
    }

    pub fn view(&self) -> FormView {
        FormView::build(&self.form, &self.phase.borrow(), self.prediction.as_ref())
    }

    /// Observe phase changes, including while `submit` holds the controller
    pub fn subscribe(&self) -> watch::Receiver<SubmitPhase> {
        self.phase.subscribe()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.phase.borrow().is_loading()
    }

    pub fn form(&self) -> &HouseForm {
        &self.form
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    pub fn predicted_price(&self) -> Option<f64> {
        self.prediction.as_ref().map(|p| p.price)
    }
}

/// Holds the phase at `Submitting` until finished or dropped.
struct LoadingGuard<'a> {
    phase: &'a watch::Sender<SubmitPhase>,
    finished: bool,
}

impl<'a> LoadingGuard<'a> {
    fn start(phase: &'a watch::Sender<SubmitPhase>) -> Self {
        phase.send_replace(SubmitPhase::Submitting);
        Self {
            phase,
            finished: false,
        }
    }

    fn finish(mut self, outcome: SubmitPhase) {
        self.phase.send_replace(outcome);
        self.finished = true;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.phase.send_replace(SubmitPhase::Idle);
        }
    }
}
