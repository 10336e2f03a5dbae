//! Domain types shared by the scorer, the API and the client.
//!
//! `RiskInput` is the validated form; everything else is derived from it.
//! Wire DTOs use camelCase to match the JSON contract of `/api/risk`.

use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(UnknownLabel {
                        kind: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} label: {value}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

str_enum!(RiskCategory {
    Best => "Best",
    Standard => "Standard",
    Basic => "Basic",
    Decline => "Decline",
});

str_enum!(BmiCategory {
    Underweight => "underweight",
    Normal => "normal",
    Overweight => "overweight",
    Obese => "obese",
    VeryObese => "very obese",
});

str_enum!(BloodPressureCategory {
    Normal => "normal",
    Elevated => "elevated",
    Stage1 => "stage 1",
    Stage2 => "stage 2",
    Crisis => "crisis",
    Unclassified => "unclassified",
});

// ═══════════════════════════════════════════════════════════
// Input
// ═══════════════════════════════════════════════════════════

/// A parsed `systolic/diastolic` reading in mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloodPressure {
    pub systolic: u16,
    pub diastolic: u16,
}

impl std::fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// Validated risk form. Built only by `validation`, immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskInput {
    pub name: String,
    pub age: u32,
    pub feet: u32,
    pub inches: u32,
    pub pounds: f64,
    pub blood_pressure: BloodPressure,
    /// Free text or comma-joined tags.
    pub family: String,
}

impl RiskInput {
    /// Total height in inches. Computed in `f64` so no input can overflow.
    pub fn height_inches(&self) -> f64 {
        f64::from(self.feet) * 12.0 + f64::from(self.inches)
    }

    /// JSON body for `POST /api/risk`.
    pub fn to_request(&self) -> RiskRequest {
        RiskRequest {
            name: Some(self.name.clone()),
            age: Some(self.age.into()),
            feet: Some(self.feet.into()),
            inches: Some(self.inches.into()),
            pounds: Some(self.pounds.into()),
            blood_pressure: Some(self.blood_pressure.to_string()),
            family: Some(self.family.clone()),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Output
// ═══════════════════════════════════════════════════════════

/// Points per factor plus the derived total and category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBreakdown {
    pub age_points: u32,
    pub bmi_points: u32,
    pub bp_points: u32,
    pub family_points: u32,
    pub total: u32,
    pub category: RiskCategory,
}

// ═══════════════════════════════════════════════════════════
// Wire types for /api/risk and /api/ping
// ═══════════════════════════════════════════════════════════

/// Request body of `POST /api/risk`.
///
/// Every field is optional and numbers are kept as raw JSON so that
/// missing or mistyped values turn into field errors instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feet: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inches: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pounds: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Height {
    pub feet: u32,
    pub inches: u32,
}

/// Echo of the submitted input inside a `RiskAssessment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputEcho {
    pub name: String,
    pub age: u32,
    pub height: Height,
    pub pounds: f64,
    pub blood_pressure: String,
    pub family: String,
}

impl From<&RiskInput> for InputEcho {
    fn from(input: &RiskInput) -> Self {
        Self {
            name: input.name.clone(),
            age: input.age,
            height: Height {
                feet: input.feet,
                inches: input.inches,
            },
            pounds: input.pounds,
            blood_pressure: input.blood_pressure.to_string(),
            family: input.family.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDetails {
    /// BMI rounded to one decimal.
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub blood_pressure_category: BloodPressureCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsBreakdown {
    pub age: u32,
    pub bmi: u32,
    pub blood_pressure: u32,
    pub family: u32,
}

/// Response body of `POST /api/risk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub input: InputEcho,
    pub details: AssessmentDetails,
    pub points: PointsBreakdown,
    pub total: u32,
    pub category: RiskCategory,
}

impl RiskAssessment {
    /// Collapse the wire shape back to the scorer's breakdown.
    pub fn breakdown(&self) -> RiskBreakdown {
        RiskBreakdown {
            age_points: self.points.age,
            bmi_points: self.points.bmi,
            bp_points: self.points.blood_pressure,
            family_points: self.points.family,
            total: self.total,
            category: self.category,
        }
    }
}

/// Response body of `GET /api/ping`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingStatus {
    /// RFC 3339 timestamp of the server clock.
    pub now: String,
    pub uptime_seconds: u64,
}
