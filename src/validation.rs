//! Field-keyed validation of the risk form.
//!
//! Two entry points produce the same `RiskInput`: `validate_form` for raw
//! strings typed into a form, `validate_request` for the JSON body of
//! `POST /api/risk`. All errors are collected before returning, keyed by
//! field in form order so the first entry is the one to focus.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::models::{BloodPressure, RiskInput, RiskRequest};

// ═══════════════════════════════════════════════════════════
// Field errors
// ═══════════════════════════════════════════════════════════

/// Form fields in display order. `General` carries non-field errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Age,
    Feet,
    Inches,
    Pounds,
    BloodPressure,
    Family,
    General,
}

impl Field {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Feet => "feet",
            Self::Inches => "inches",
            Self::Pounds => "pounds",
            Self::BloodPressure => "bloodPressure",
            Self::Family => "family",
            Self::General => "general",
        }
    }

    /// Unknown keys from a server response land on `General`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "name" => Self::Name,
            "age" => Self::Age,
            "feet" => Self::Feet,
            "inches" => Self::Inches,
            "pounds" => Self::Pounds,
            "bloodPressure" => Self::BloodPressure,
            "family" => Self::Family,
            _ => Self::General,
        }
    }
}

/// Ordered `field → message` map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn general(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(Field::General, message);
        errors
    }

    /// Keeps the first message recorded for a field.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// The field a front end should focus.
    pub fn first(&self) -> Option<(Field, &str)> {
        self.0.iter().next().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rebuild from a wire map such as a server's `errors` object.
    pub fn from_wire(map: BTreeMap<String, String>) -> Self {
        let mut errors = Self::new();
        for (key, message) in map {
            errors.insert(Field::from_key(&key), message);
        }
        errors
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, message) in &self.0 {
            map.serialize_entry(field.key(), message)?;
        }
        map.end()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {message}", field.key()))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

// ═══════════════════════════════════════════════════════════
// Messages
// ═══════════════════════════════════════════════════════════

pub const NAME_REQUIRED: &str = "Name is required.";
pub const AGE_REQUIRED: &str = "Age is required.";
pub const AGE_INVALID: &str = "Valid age is required.";
pub const FEET_REQUIRED: &str = "Height (feet) is required.";
pub const FEET_INVALID: &str = "Minimum height is 2 feet.";
pub const FEET_TOO_TALL: &str = "Maximum height is 9 feet.";
pub const INCHES_REQUIRED: &str = "Height (inches) is required.";
pub const INCHES_INVALID: &str = "Inches must be 0–11.";
pub const POUNDS_REQUIRED: &str = "Weight (lbs) is required.";
pub const POUNDS_INVALID: &str = "Valid weight required.";
pub const FAMILY_REQUIRED: &str = "Select at least one family history option.";
pub const BLOOD_PRESSURE_INVALID: &str = "Use ###/## (e.g., 120/80).";

const MIN_FEET: u32 = 2;
const MAX_FEET: u32 = 9;
const MAX_INCHES: u32 = 11;

// ═══════════════════════════════════════════════════════════
// Raw form
// ═══════════════════════════════════════════════════════════

/// Raw field values as typed. Values are trimmed during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskForm {
    pub name: String,
    pub age: String,
    pub feet: String,
    pub inches: String,
    pub pounds: String,
    pub blood_pressure: String,
    pub family: String,
}

/// Validate raw form strings.
pub fn validate_form(form: &RiskForm) -> Result<RiskInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = required_text(&form.name, Field::Name, NAME_REQUIRED, &mut errors);
    let age = number_field(&form.age, Field::Age, AGE_REQUIRED, &mut errors)
        .and_then(|n| check_age(n, &mut errors));
    let feet = number_field(&form.feet, Field::Feet, FEET_REQUIRED, &mut errors)
        .and_then(|n| check_feet(n, &mut errors));
    let inches = number_field(&form.inches, Field::Inches, INCHES_REQUIRED, &mut errors)
        .and_then(|n| check_inches(n, &mut errors));
    let pounds = number_field(&form.pounds, Field::Pounds, POUNDS_REQUIRED, &mut errors)
        .and_then(|n| check_pounds(n, &mut errors));
    let family = required_text(&form.family, Field::Family, FAMILY_REQUIRED, &mut errors);
    let blood_pressure = blood_pressure_field(&form.blood_pressure, &mut errors);

    build(name, age, feet, inches, pounds, blood_pressure, family, errors)
}

/// Validate a JSON request body.
pub fn validate_request(req: &RiskRequest) -> Result<RiskInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = required_text(
        req.name.as_deref().unwrap_or_default(),
        Field::Name,
        NAME_REQUIRED,
        &mut errors,
    );
    let age = json_number(req.age.as_ref(), Field::Age, AGE_REQUIRED, &mut errors)
        .and_then(|n| check_age(n, &mut errors));
    let feet = json_number(req.feet.as_ref(), Field::Feet, FEET_REQUIRED, &mut errors)
        .and_then(|n| check_feet(n, &mut errors));
    let inches = json_number(req.inches.as_ref(), Field::Inches, INCHES_REQUIRED, &mut errors)
        .and_then(|n| check_inches(n, &mut errors));
    let pounds = json_number(req.pounds.as_ref(), Field::Pounds, POUNDS_REQUIRED, &mut errors)
        .and_then(|n| check_pounds(n, &mut errors));
    let family = required_text(
        req.family.as_deref().unwrap_or_default(),
        Field::Family,
        FAMILY_REQUIRED,
        &mut errors,
    );
    let blood_pressure =
        blood_pressure_field(req.blood_pressure.as_deref().unwrap_or_default(), &mut errors);

    build(name, age, feet, inches, pounds, blood_pressure, family, errors)
}

/// Parse a `systolic/diastolic` reading, tolerating whitespace around parts.
pub fn parse_blood_pressure(raw: &str) -> Result<BloodPressure, String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(\d{2,3})\s*/\s*(\d{2,3})\s*$").expect("blood pressure pattern is valid")
    });

    let caps = pattern
        .captures(raw)
        .ok_or_else(|| BLOOD_PRESSURE_INVALID.to_string())?;

    // At most three digits, so both always fit in u16.
    let systolic = caps[1]
        .parse::<u16>()
        .map_err(|_| BLOOD_PRESSURE_INVALID.to_string())?;
    let diastolic = caps[2]
        .parse::<u16>()
        .map_err(|_| BLOOD_PRESSURE_INVALID.to_string())?;

    Ok(BloodPressure {
        systolic,
        diastolic,
    })
}

// ═══════════════════════════════════════════════════════════
// Field checks
// ═══════════════════════════════════════════════════════════

fn required_text(raw: &str, field: Field, message: &str, errors: &mut FieldErrors) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.insert(field, message);
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Missing → `required`; present but not a number → `NaN` so the range check reports it.
fn number_field(raw: &str, field: Field, required: &str, errors: &mut FieldErrors) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.insert(field, required);
        return None;
    }
    Some(trimmed.parse::<f64>().unwrap_or(f64::NAN))
}

fn json_number(
    value: Option<&serde_json::Value>,
    field: Field,
    required: &str,
    errors: &mut FieldErrors,
) -> Option<f64> {
    match value {
        None | Some(serde_json::Value::Null) => {
            errors.insert(field, required);
            None
        }
        Some(serde_json::Value::Number(n)) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Some(serde_json::Value::String(s)) => number_field(s, field, required, errors),
        Some(_) => Some(f64::NAN),
    }
}

fn whole(n: f64) -> Option<u32> {
    if n.is_finite() && n.fract() == 0.0 && n >= 0.0 && n <= f64::from(u32::MAX) {
        Some(n as u32)
    } else {
        None
    }
}

fn check_age(n: f64, errors: &mut FieldErrors) -> Option<u32> {
    let age = whole(n);
    if age.is_none() {
        errors.insert(Field::Age, AGE_INVALID);
    }
    age
}

fn check_feet(n: f64, errors: &mut FieldErrors) -> Option<u32> {
    match whole(n) {
        Some(feet) if (MIN_FEET..=MAX_FEET).contains(&feet) => Some(feet),
        Some(feet) if feet > MAX_FEET => {
            errors.insert(Field::Feet, FEET_TOO_TALL);
            None
        }
        _ => {
            errors.insert(Field::Feet, FEET_INVALID);
            None
        }
    }
}

fn check_inches(n: f64, errors: &mut FieldErrors) -> Option<u32> {
    match whole(n) {
        Some(inches) if inches <= MAX_INCHES => Some(inches),
        _ => {
            errors.insert(Field::Inches, INCHES_INVALID);
            None
        }
    }
}

fn check_pounds(n: f64, errors: &mut FieldErrors) -> Option<f64> {
    if n.is_finite() && n > 0.0 {
        Some(n)
    } else {
        errors.insert(Field::Pounds, POUNDS_INVALID);
        None
    }
}

fn blood_pressure_field(raw: &str, errors: &mut FieldErrors) -> Option<BloodPressure> {
    match parse_blood_pressure(raw) {
        Ok(bp) => Some(bp),
        Err(message) => {
            errors.insert(Field::BloodPressure, message);
            None
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn build(
    name: Option<String>,
    age: Option<u32>,
    feet: Option<u32>,
    inches: Option<u32>,
    pounds: Option<f64>,
    blood_pressure: Option<BloodPressure>,
    family: Option<String>,
    errors: FieldErrors,
) -> Result<RiskInput, FieldErrors> {
    match (name, age, feet, inches, pounds, blood_pressure, family) {
        (
            Some(name),
            Some(age),
            Some(feet),
            Some(inches),
            Some(pounds),
            Some(blood_pressure),
            Some(family),
        ) if errors.is_empty() => Ok(RiskInput {
            name,
            age,
            feet,
            inches,
            pounds,
            blood_pressure,
            family,
        }),
        _ => {
            tracing::debug!(error_count = errors.len(), "Risk form rejected");
            Err(errors)
        }
    }
}
