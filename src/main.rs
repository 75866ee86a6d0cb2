use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use house_price_predictor::models::{
    Field, FieldKind, FurnishingStatus, HouseForm, NumericInput, YesNo, FIELDS,
};
use house_price_predictor::predictors::types::{API_URL_VAR, TIMEOUT_VAR};
use house_price_predictor::view::SubmitButton;
use house_price_predictor::{
    ConsoleNotifier, FormController, HttpPredictor, InvalidNumberPolicy, Notifier, PredictorConfig,
    PricePredictor,
};
use std::io;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "house-price-predictor")]
#[command(
    about = "Fill in house features and ask the prediction service for a price",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Base URL of the prediction service (falls back to PRICE_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Request timeout in seconds (falls back to PRICE_API_TIMEOUT_SECS, then 30)
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Send unparsable numbers as null instead of refusing to submit
    #[arg(long)]
    forward_invalid_numbers: bool,

    /// Prompt for every field before submitting
    #[arg(short, long)]
    interactive: bool,

    /// Field values, e.g. area=7420 bedrooms=4 furnishingstatus=furnished
    #[arg(value_name = "FIELD=VALUE")]
    values: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = resolve_config(&cli, |name| std::env::var(name).ok())?;
    let predictor = HttpPredictor::new(&config).context("Failed to set up prediction client")?;
    info!("Using prediction service at {}", predictor.endpoint());

    let mut controller =
        FormController::new(predictor, ConsoleNotifier::new()).with_policy(policy(&cli));

    apply_pairs(&mut controller, &cli.values)?;

    if cli.interactive {
        let form = controller.form().clone();
        let answers = tokio::task::spawn_blocking(move || prompt_answers(&form))
            .await
            .context("Prompt task failed")??;
        for (field, value) in answers {
            controller.set_field(field, &value)?;
        }
    }

    println!("{}", controller.view());

    // Show the busy control while the request is in flight
    let mut phases = controller.subscribe();
    let busy = tokio::spawn(async move {
        while phases.changed().await.is_ok() {
            let phase = phases.borrow_and_update().clone();
            if phase.is_loading() {
                println!("[ {} ]", SubmitButton::for_phase(&phase).label);
            }
        }
    });

    let outcome = controller.submit().await;
    busy.abort();

    match outcome {
        Ok(_) => {
            println!("{}", controller.view());
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => {
            if cli.interactive {
                tokio::task::spawn_blocking(acknowledge)
                    .await
                    .context("Prompt task failed")??;
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Flags win over the environment, setting by setting
fn resolve_config<F>(cli: &Cli, lookup: F) -> Result<PredictorConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let config = PredictorConfig::from_lookup(|name| match name {
        API_URL_VAR if cli.api_url.is_some() => cli.api_url.clone(),
        TIMEOUT_VAR if cli.timeout_secs.is_some() => None,
        _ => lookup(name),
    })
    .context("No prediction service configured (use --api-url or PRICE_API_URL)")?;

    Ok(match cli.timeout_secs {
        Some(secs) => config.with_timeout(Duration::from_secs(secs)),
        None => config,
    })
}

fn policy(cli: &Cli) -> InvalidNumberPolicy {
    if cli.forward_invalid_numbers {
        InvalidNumberPolicy::Forward
    } else {
        InvalidNumberPolicy::Reject
    }
}

/// Apply `FIELD=VALUE` arguments in order
fn apply_pairs<P, N>(controller: &mut FormController<P, N>, pairs: &[String]) -> Result<()>
where
    P: PricePredictor,
    N: Notifier,
{
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .with_context(|| format!("Expected FIELD=VALUE, got {pair:?}"))?;
        controller
            .set_field_by_name(name, value)
            .with_context(|| format!("Could not set {name}"))?;
    }
    Ok(())
}

/// Ask for every field in table order, starting from the current values
fn prompt_answers(form: &HouseForm) -> Result<Vec<(Field, String)>> {
    let theme = ColorfulTheme::default();
    let mut answers = Vec::with_capacity(FIELDS.len());

    for spec in &FIELDS {
        let current = form.value(spec.field);
        let options: &[(&'static str, &'static str)] = match spec.kind {
            FieldKind::Number(kind) => {
                let answer: String = Input::with_theme(&theme)
                    .with_prompt(spec.label)
                    .with_initial_text(current)
                    .allow_empty(true)
                    .validate_with(move |input: &String| -> Result<(), String> {
                        if input.trim().is_empty()
                            || NumericInput::new(kind, input.as_str()).is_valid()
                        {
                            Ok(())
                        } else {
                            Err(format!("{:?} is not a valid number", input.trim()))
                        }
                    })
                    .interact_text()?;
                answers.push((spec.field, answer.trim().to_string()));
                continue;
            }
            FieldKind::YesNo => &YesNo::OPTIONS,
            FieldKind::Furnishing => &FurnishingStatus::OPTIONS,
        };

        let labels: Vec<&str> = options.iter().map(|(_, label)| *label).collect();
        let selected = options
            .iter()
            .position(|(value, _)| *value == current)
            .unwrap_or(0);
        let picked = Select::with_theme(&theme)
            .with_prompt(spec.label)
            .items(&labels)
            .default(selected)
            .interact()?;
        answers.push((spec.field, options[picked].0.to_string()));
    }

    Ok(answers)
}

/// Hold the failure notice on screen until the user dismisses it
fn acknowledge() -> Result<()> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Dismiss")
        .default(true)
        .show_default(false)
        .wait_for_newline(true)
        .interact()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use house_price_predictor::RecordingNotifier;
    use std::collections::HashMap;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["house-price-predictor"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn offline_controller() -> FormController<HttpPredictor, RecordingNotifier> {
        let predictor = HttpPredictor::new(&PredictorConfig::new("http://127.0.0.1:9")).unwrap();
        FormController::new(predictor, RecordingNotifier::new())
    }

    #[test]
    fn flags_override_environment() {
        let config = resolve_config(
            &cli(&["--api-url", "http://flag:8000", "--timeout-secs", "7"]),
            env(&[(API_URL_VAR, "http://env:9000"), (TIMEOUT_VAR, "40")]),
        )
        .unwrap();

        assert_eq!(config.base_url, "http://flag:8000");
        assert_eq!(config.timeout, Duration::from_secs(7));
    }

    #[test]
    fn environment_fills_in_missing_flags() {
        let config = resolve_config(
            &cli(&["--api-url", "http://flag:8000"]),
            env(&[(API_URL_VAR, "http://env:9000"), (TIMEOUT_VAR, "40")]),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://flag:8000");
        assert_eq!(config.timeout, Duration::from_secs(40));

        let config = resolve_config(&cli(&[]), env(&[(API_URL_VAR, "http://env:9000")])).unwrap();
        assert_eq!(config.base_url, "http://env:9000");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn timeout_flag_masks_bad_environment_value() {
        let config = resolve_config(
            &cli(&["--timeout-secs", "3"]),
            env(&[(API_URL_VAR, "http://env:9000"), (TIMEOUT_VAR, "soon")]),
        )
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn missing_url_everywhere_is_an_error() {
        let err = resolve_config(&cli(&[]), env(&[])).unwrap_err();
        assert!(err.to_string().contains("--api-url"));
    }

    #[test]
    fn forward_flag_selects_forward_policy() {
        assert_eq!(policy(&cli(&[])), InvalidNumberPolicy::Reject);
        assert_eq!(
            policy(&cli(&["--forward-invalid-numbers"])),
            InvalidNumberPolicy::Forward
        );
    }

    #[test]
    fn pairs_set_fields_in_order() {
        let args = cli(&["area=7420", "bedrooms=4", "furnishingstatus=furnished", "area=8000"]);
        let mut controller = offline_controller();

        apply_pairs(&mut controller, &args.values).unwrap();

        assert_eq!(controller.form().value(Field::Area), "8000");
        assert_eq!(controller.form().value(Field::Bedrooms), "4");
        assert_eq!(controller.form().value(Field::Furnishingstatus), "furnished");
    }

    #[test]
    fn pair_without_equals_is_rejected() {
        let mut controller = offline_controller();
        let err = apply_pairs(&mut controller, &["area7420".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Expected FIELD=VALUE"));
    }

    #[test]
    fn pair_with_unknown_field_is_rejected() {
        let mut controller = offline_controller();
        let err = apply_pairs(&mut controller, &["garden=yes".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "Could not set garden");
        assert_eq!(controller.form(), &HouseForm::default());
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let mut controller = offline_controller();
        apply_pairs(&mut controller, &["area=1=2".to_string()]).unwrap();
        assert_eq!(controller.form().value(Field::Area), "1=2");
        assert!(!controller.form().area.is_valid());
    }
}
