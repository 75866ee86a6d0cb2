//! Render model for the form.
//!
//! A [`FormView`] is rebuilt from controller state every time it is needed;
//! nothing here holds state of its own. Its `Display` impl is the text form
//! the CLI prints.

use crate::controller::SubmitPhase;
use crate::models::{Field, FieldKind, FurnishingStatus, HouseForm, Prediction, YesNo, FIELDS};
use std::fmt;

pub const TITLE: &str = "🏠 House Price Predictor";
pub const SUBMIT_LABEL: &str = "Predict Price";
pub const BUSY_LABEL: &str = "Predicting...";

/// One selectable option of a choice input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Input widget bound to a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    NumberInput { value: String },
    Select { selected: &'static str, options: Vec<ChoiceOption> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub id: &'static str,
    pub label: &'static str,
    pub widget: Widget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub disabled: bool,
}

impl SubmitButton {
    pub fn for_phase(phase: &SubmitPhase) -> Self {
        if phase.is_loading() {
            Self {
                label: BUSY_LABEL,
                disabled: true,
            }
        } else {
            Self {
                label: SUBMIT_LABEL,
                disabled: false,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub submit: SubmitButton,
    /// Result line, present only once a price is known
    pub result: Option<String>,
}

impl FormView {
    pub fn build(form: &HouseForm, phase: &SubmitPhase, prediction: Option<&Prediction>) -> Self {
        let fields = FIELDS
            .iter()
            .map(|spec| FieldView {
                id: spec.field.name(),
                label: spec.label,
                widget: widget_for(form, spec.field, spec.kind),
            })
            .collect();

        Self {
            fields,
            submit: SubmitButton::for_phase(phase),
            result: prediction
                .map(|p| format!("🏷️ Predicted Price: ₹{}", format_price(p.price))),
        }
    }

    pub fn field(&self, id: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.id == id)
    }
}

fn widget_for(form: &HouseForm, field: Field, kind: FieldKind) -> Widget {
    let options: &[(&'static str, &'static str)] = match kind {
        FieldKind::Number(_) => {
            return Widget::NumberInput {
                value: form.value(field).to_string(),
            }
        }
        FieldKind::YesNo => &YesNo::OPTIONS,
        FieldKind::Furnishing => &FurnishingStatus::OPTIONS,
    };

    let current = form.value(field);
    Widget::Select {
        selected: options
            .iter()
            .map(|(value, _)| *value)
            .find(|value| *value == current)
            .unwrap_or(""),
        options: options
            .iter()
            .map(|&(value, label)| ChoiceOption { value, label })
            .collect(),
    }
}

/// Whole units with comma thousands separators, e.g. `4,500,000`
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return price.to_string();
    }

    let rounded = price.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE}")?;
        writeln!(f)?;

        for field in &self.fields {
            match &field.widget {
                Widget::NumberInput { value } => {
                    writeln!(f, "{:<18} [{}]", field.label, value)?;
                }
                Widget::Select { selected, options } => {
                    let rendered: Vec<String> = options
                        .iter()
                        .map(|o| {
                            if o.value == *selected {
                                format!("(•) {}", o.label)
                            } else {
                                format!("( ) {}", o.label)
                            }
                        })
                        .collect();
                    writeln!(f, "{:<18} {}", field.label, rendered.join("  "))?;
                }
            }
        }

        writeln!(f)?;
        if self.submit.disabled {
            writeln!(f, "[ {} ] (disabled)", self.submit.label)?;
        } else {
            writeln!(f, "[ {} ]", self.submit.label)?;
        }

        if let Some(result) = &self.result {
            writeln!(f)?;
            writeln!(f, "{result}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_is_rounded_and_grouped() {
        assert_eq!(format_price(4_500_000.0), "4,500,000");
        assert_eq!(format_price(999.4), "999");
        assert_eq!(format_price(1_234.5), "1,235");
        assert_eq!(format_price(0.0), "0");
        assert_eq!(format_price(-12_345.0), "-12,345");
    }

    #[test]
    fn fields_render_in_table_order_with_labels() {
        let view = FormView::build(&HouseForm::default(), &SubmitPhase::Idle, None);
        let labels: Vec<_> = view.fields.iter().map(|f| f.label).collect();
        assert_eq!(labels[0], "Area");
        assert_eq!(labels[8], "Hotwaterheating");
        assert_eq!(labels[11], "Furnishing Status");
        assert_eq!(view.result, None);
    }

    #[test]
    fn widgets_follow_field_kind() {
        let mut form = HouseForm::default();
        form.set(Field::Area, "120").unwrap();
        let view = FormView::build(&form, &SubmitPhase::Idle, None);

        assert_eq!(
            view.field("area").unwrap().widget,
            Widget::NumberInput {
                value: "120".to_string()
            }
        );

        match &view.field("mainroad").unwrap().widget {
            Widget::Select { selected, options } => {
                assert_eq!(*selected, "yes");
                assert_eq!(options.len(), 2);
            }
            other => panic!("unexpected widget: {other:?}"),
        }

        match &view.field("furnishingstatus").unwrap().widget {
            Widget::Select { selected, options } => {
                assert_eq!(*selected, "unfurnished");
                let labels: Vec<_> = options.iter().map(|o| o.label).collect();
                assert_eq!(labels, ["Furnished", "Semi-Furnished", "Unfurnished"]);
            }
            other => panic!("unexpected widget: {other:?}"),
        }
    }

    #[test]
    fn submit_button_is_busy_while_loading() {
        let busy = SubmitButton::for_phase(&SubmitPhase::Submitting);
        assert_eq!(
            busy,
            SubmitButton {
                label: BUSY_LABEL,
                disabled: true
            }
        );

        let failed = SubmitButton::for_phase(&SubmitPhase::Failed {
            message: "bad input".to_string(),
        });
        assert_eq!(
            failed,
            SubmitButton {
                label: SUBMIT_LABEL,
                disabled: false
            }
        );
    }

    #[test]
    fn result_line_shows_formatted_price() {
        let prediction = Prediction::new(4_500_000.0);
        let view = FormView::build(&HouseForm::default(), &SubmitPhase::Idle, Some(&prediction));
        assert_eq!(view.result.as_deref(), Some("🏷️ Predicted Price: ₹4,500,000"));

        let text = view.to_string();
        assert!(text.starts_with(TITLE));
        assert!(text.contains("[ Predict Price ]"));
        assert!(text.contains("(•) Yes"));
        assert!(text.ends_with("🏷️ Predicted Price: ₹4,500,000\n"));
    }
}
