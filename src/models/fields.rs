use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every field the form recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Area,
    Bedrooms,
    Bathrooms,
    Stories,
    Parking,
    Mainroad,
    Guestroom,
    Basement,
    Hotwaterheating,
    Airconditioning,
    Prefarea,
    Furnishingstatus,
}

/// How a numeric field is converted when the request is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Float,
    Integer,
}

/// How a field is rendered and which values it accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number(NumberKind),
    YesNo,
    Furnishing,
}

/// One row of the field table
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn new(field: Field, label: &'static str, kind: FieldKind) -> Self {
        Self { field, label, kind }
    }
}

const FLOAT: FieldKind = FieldKind::Number(NumberKind::Float);
const INTEGER: FieldKind = FieldKind::Number(NumberKind::Integer);
const YES_NO: FieldKind = FieldKind::YesNo;
const FURNISHING: FieldKind = FieldKind::Furnishing;

/// Field table, in render order.
pub const FIELDS: [FieldSpec; 12] = [
    FieldSpec::new(Field::Area, "Area", FLOAT),
    FieldSpec::new(Field::Bedrooms, "Bedrooms", INTEGER),
    FieldSpec::new(Field::Bathrooms, "Bathrooms", FLOAT),
    FieldSpec::new(Field::Stories, "Stories", FLOAT),
    FieldSpec::new(Field::Parking, "Parking", INTEGER),
    FieldSpec::new(Field::Mainroad, "Mainroad", YES_NO),
    FieldSpec::new(Field::Guestroom, "Guestroom", YES_NO),
    FieldSpec::new(Field::Basement, "Basement", YES_NO),
    FieldSpec::new(Field::Hotwaterheating, "Hotwaterheating", YES_NO),
    FieldSpec::new(Field::Airconditioning, "Airconditioning", YES_NO),
    FieldSpec::new(Field::Prefarea, "Prefarea", YES_NO),
    FieldSpec::new(Field::Furnishingstatus, "Furnishing Status", FURNISHING),
];

impl Field {
    /// Wire name, also used as the input id
    pub fn name(self) -> &'static str {
        match self {
            Field::Area => "area",
            Field::Bedrooms => "bedrooms",
            Field::Bathrooms => "bathrooms",
            Field::Stories => "stories",
            Field::Parking => "parking",
            Field::Mainroad => "mainroad",
            Field::Guestroom => "guestroom",
            Field::Basement => "basement",
            Field::Hotwaterheating => "hotwaterheating",
            Field::Airconditioning => "airconditioning",
            Field::Prefarea => "prefarea",
            Field::Furnishingstatus => "furnishingstatus",
        }
    }

    pub fn spec(self) -> &'static FieldSpec {
        FIELDS
            .iter()
            .find(|spec| spec.field == self)
            .unwrap_or_else(|| unreachable!("every field has a table entry"))
    }

    pub fn kind(self) -> FieldKind {
        self.spec().kind
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn all() -> impl Iterator<Item = Field> {
        FIELDS.iter().map(|spec| spec.field)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Field::all()
            .find(|field| field.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FormError::UnknownField {
                name: s.to_string(),
            })
    }
}

/// Answer of a two-option choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub const OPTIONS: [(&'static str, &'static str); 2] = [("yes", "Yes"), ("no", "No")];

    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }

    pub(crate) fn parse(field: Field, value: &str) -> Result<Self, FormError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(YesNo::Yes),
            "no" => Ok(YesNo::No),
            _ => Err(invalid_choice(field, value, &Self::OPTIONS)),
        }
    }
}

/// Furnishing state of the house
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FurnishingStatus {
    Furnished,
    SemiFurnished,
    #[default]
    Unfurnished,
}

impl FurnishingStatus {
    pub const OPTIONS: [(&'static str, &'static str); 3] = [
        ("furnished", "Furnished"),
        ("semi-furnished", "Semi-Furnished"),
        ("unfurnished", "Unfurnished"),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FurnishingStatus::Furnished => "furnished",
            FurnishingStatus::SemiFurnished => "semi-furnished",
            FurnishingStatus::Unfurnished => "unfurnished",
        }
    }

    pub(crate) fn parse(field: Field, value: &str) -> Result<Self, FormError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "furnished" => Ok(FurnishingStatus::Furnished),
            "semi-furnished" => Ok(FurnishingStatus::SemiFurnished),
            "unfurnished" => Ok(FurnishingStatus::Unfurnished),
            _ => Err(invalid_choice(field, value, &Self::OPTIONS)),
        }
    }
}

fn invalid_choice(
    field: Field,
    value: &str,
    options: &[(&'static str, &'static str)],
) -> FormError {
    FormError::InvalidChoice {
        field: field.name(),
        value: value.to_string(),
        expected: options
            .iter()
            .map(|(value, _)| *value)
            .collect::<Vec<_>>()
            .join(", "),
    }
}
