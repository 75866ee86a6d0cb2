use crate::error::FormError;
use crate::models::fields::{Field, FieldKind, FurnishingStatus, NumberKind, YesNo};

/// Text typed into a numeric input, with its parse memoized at input time
#[derive(Debug, Clone, PartialEq)]
pub struct NumericInput {
    raw: String,
    value: Option<f64>,
}

impl NumericInput {
    pub fn new(kind: NumberKind, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = parse_number(kind, &raw);
        Self { raw, value }
    }

    pub fn empty() -> Self {
        Self {
            raw: String::new(),
            value: None,
        }
    }

    /// Exactly what was typed
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `None` when the text is empty or not a finite number.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }
}

impl Default for NumericInput {
    fn default() -> Self {
        Self::empty()
    }
}

/// Integers truncate toward zero so "3.7" reads as 3, and must fit an `i64`.
fn parse_number(kind: NumberKind, raw: &str) -> Option<f64> {
    let parsed = raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())?;
    match kind {
        NumberKind::Float => Some(parsed),
        NumberKind::Integer => {
            let whole = parsed.trunc();
            // i64::MAX as f64 rounds up to 2^63, hence the open upper bound
            (i64::MIN as f64..i64::MAX as f64)
                .contains(&whole)
                .then_some(whole)
        }
    }
}

/// The house features being edited
#[derive(Debug, Clone, PartialEq)]
pub struct HouseForm {
    pub area: NumericInput,
    pub bedrooms: NumericInput,
    pub bathrooms: NumericInput,
    pub stories: NumericInput,
    pub parking: NumericInput,
    pub mainroad: YesNo,
    pub guestroom: YesNo,
    pub basement: YesNo,
    pub hotwaterheating: YesNo,
    pub airconditioning: YesNo,
    pub prefarea: YesNo,
    pub furnishingstatus: FurnishingStatus,
}

impl Default for HouseForm {
    fn default() -> Self {
        Self {
            area: NumericInput::empty(),
            bedrooms: NumericInput::empty(),
            bathrooms: NumericInput::empty(),
            stories: NumericInput::empty(),
            parking: NumericInput::empty(),
            mainroad: YesNo::Yes,
            guestroom: YesNo::No,
            basement: YesNo::No,
            hotwaterheating: YesNo::No,
            airconditioning: YesNo::No,
            prefarea: YesNo::No,
            furnishingstatus: FurnishingStatus::Unfurnished,
        }
    }
}

impl HouseForm {
    /// Overwrite a single field.
    ///
    /// Numeric fields take any text; choice fields must name one of their
    /// options, otherwise the form is left untouched.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), FormError> {
        match field.kind() {
            FieldKind::Number(kind) => {
                if let Some(input) = self.numeric_mut(field) {
                    *input = NumericInput::new(kind, value);
                }
            }
            FieldKind::YesNo => {
                let answer = YesNo::parse(field, value)?;
                if let Some(slot) = self.yes_no_mut(field) {
                    *slot = answer;
                }
            }
            FieldKind::Furnishing => {
                self.furnishingstatus = FurnishingStatus::parse(field, value)?;
            }
        }
        Ok(())
    }

    /// Current value as displayed by the bound input
    pub fn value(&self, field: Field) -> &str {
        if let Some(input) = self.numeric(field) {
            return input.raw();
        }
        match field {
            Field::Mainroad => self.mainroad.as_str(),
            Field::Guestroom => self.guestroom.as_str(),
            Field::Basement => self.basement.as_str(),
            Field::Hotwaterheating => self.hotwaterheating.as_str(),
            Field::Airconditioning => self.airconditioning.as_str(),
            Field::Prefarea => self.prefarea.as_str(),
            Field::Furnishingstatus => self.furnishingstatus.as_str(),
            _ => "",
        }
    }

    pub fn numeric(&self, field: Field) -> Option<&NumericInput> {
        match field {
            Field::Area => Some(&self.area),
            Field::Bedrooms => Some(&self.bedrooms),
            Field::Bathrooms => Some(&self.bathrooms),
            Field::Stories => Some(&self.stories),
            Field::Parking => Some(&self.parking),
            _ => None,
        }
    }

    /// Numeric fields whose text does not parse, in table order
    pub fn invalid_numbers(&self) -> Vec<&'static str> {
        Field::all()
            .filter(|field| matches!(self.numeric(*field), Some(input) if !input.is_valid()))
            .map(Field::name)
            .collect()
    }

    fn numeric_mut(&mut self, field: Field) -> Option<&mut NumericInput> {
        match field {
            Field::Area => Some(&mut self.area),
            Field::Bedrooms => Some(&mut self.bedrooms),
            Field::Bathrooms => Some(&mut self.bathrooms),
            Field::Stories => Some(&mut self.stories),
            Field::Parking => Some(&mut self.parking),
            _ => None,
        }
    }

    fn yes_no_mut(&mut self, field: Field) -> Option<&mut YesNo> {
        match field {
            Field::Mainroad => Some(&mut self.mainroad),
            Field::Guestroom => Some(&mut self.guestroom),
            Field::Basement => Some(&mut self.basement),
            Field::Hotwaterheating => Some(&mut self.hotwaterheating),
            Field::Airconditioning => Some(&mut self.airconditioning),
            Field::Prefarea => Some(&mut self.prefarea),
            _ => None,
        }
    }
}
