//! Two-step confirmation of a computed assessment.
//!
//! `Draft → PendingConfirmation → Confirmed | Rejected`. The result is
//! only shown once the user confirms the verification summary; rejecting
//! discards it.

use crate::models::RiskAssessment;

#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Draft,
    PendingConfirmation(RiskAssessment),
    Confirmed(RiskAssessment),
    Rejected,
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingConfirmation(_) => "pending_confirmation",
            Self::Confirmed(_) => "confirmed",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationFlow {
    state: FlowState,
}

impl Default for ConfirmationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Draft,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Present a computed assessment for confirmation.
    pub fn submit(&mut self, assessment: RiskAssessment) -> Result<(), FlowError> {
        match self.state {
            FlowState::Draft | FlowState::Rejected => {
                self.state = FlowState::PendingConfirmation(assessment);
                Ok(())
            }
            _ => Err(self.invalid("submit")),
        }
    }

    /// User accepted the summary. Returns the assessment to display.
    pub fn confirm(&mut self) -> Result<&RiskAssessment, FlowError> {
        match std::mem::replace(&mut self.state, FlowState::Draft) {
            FlowState::PendingConfirmation(assessment) => {
                tracing::debug!(total = assessment.total, "Assessment confirmed");
                self.state = FlowState::Confirmed(assessment);
            }
            other => {
                self.state = other;
                return Err(self.invalid("confirm"));
            }
        }
        self.confirmed().ok_or_else(|| self.invalid("confirm"))
    }

    /// User declined the summary. The assessment is dropped.
    pub fn reject(&mut self) -> Result<(), FlowError> {
        match self.state {
            FlowState::PendingConfirmation(_) => {
                tracing::debug!("Assessment rejected");
                self.state = FlowState::Rejected;
                Ok(())
            }
            _ => Err(self.invalid("reject")),
        }
    }

    /// Return to editing from any state.
    pub fn edit(&mut self) {
        self.state = FlowState::Draft;
    }

    pub fn pending(&self) -> Option<&RiskAssessment> {
        match &self.state {
            FlowState::PendingConfirmation(a) => Some(a),
            _ => None,
        }
    }

    pub fn confirmed(&self) -> Option<&RiskAssessment> {
        match &self.state {
            FlowState::Confirmed(a) => Some(a),
            _ => None,
        }
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}

/// Verification text shown before the result is revealed.
pub fn summary(assessment: &RiskAssessment) -> String {
    let input = &assessment.input;
    let details = &assessment.details;
    let family = if input.family.is_empty() {
        "(none)"
    } else {
        input.family.as_str()
    };

    [
        "Please confirm the details below:\n".to_string(),
        format!("Name: {}", input.name),
        format!("Age: {}", input.age),
        format!("Height: {}'{}\"", input.height.feet, input.height.inches),
        format!("Weight: {} lbs", input.pounds),
        format!(
            "Blood Pressure: {} ({})",
            input.blood_pressure, details.blood_pressure_category
        ),
        format!("Family History: {family}"),
        String::new(),
        format!("Calculated BMI: {:.1} ({})", details.bmi, details.bmi_category),
        String::new(),
        "Is this information correct?".to_string(),
    ]
    .join("\n")
}

/// Result card for a confirmed assessment.
pub fn render_result(assessment: &RiskAssessment) -> String {
    let points = &assessment.points;
    format!(
        "Score: {}\nRisk Category: {}\n\nPoints breakdown\n  Age: {}\n  BMI: {}\n  Blood Pressure: {}\n  Family: {}",
        assessment.total,
        assessment.category,
        points.age,
        points.bmi,
        points.blood_pressure,
        points.family,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BloodPressure, RiskInput};
    use crate::scoring::assess;

    fn sample() -> RiskAssessment {
        assess(&RiskInput {
            name: "A".into(),
            age: 50,
            feet: 5,
            inches: 10,
            pounds: 180.0,
            blood_pressure: BloodPressure {
                systolic: 130,
                diastolic: 85,
            },
            family: "none".into(),
        })
    }

    #[test]
    fn submit_then_confirm() {
        let mut flow = ConfirmationFlow::new();
        flow.submit(sample()).unwrap();
        assert!(flow.pending().is_some());
        let confirmed = flow.confirm().unwrap();
        assert_eq!(confirmed.total, 80);
        assert_eq!(flow.state().name(), "confirmed");
    }

    #[test]
    fn reject_discards_result() {
        let mut flow = ConfirmationFlow::new();
        flow.submit(sample()).unwrap();
        flow.reject().unwrap();
        assert_eq!(flow.state(), &FlowState::Rejected);
        assert!(flow.confirmed().is_none());
        // Resubmitting after a rejection is allowed.
        flow.submit(sample()).unwrap();
        assert!(flow.pending().is_some());
    }

    #[test]
    fn confirm_without_submit_fails() {
        let mut flow = ConfirmationFlow::new();
        let err = flow.confirm().unwrap_err();
        assert_eq!(
            err,
            FlowError::InvalidTransition {
                action: "confirm",
                state: "draft"
            }
        );
        assert_eq!(flow.state(), &FlowState::Draft);
    }

    #[test]
    fn failed_confirm_keeps_current_state() {
        let mut flow = ConfirmationFlow::new();
        flow.submit(sample()).unwrap();
        flow.reject().unwrap();
        let err = flow.confirm().unwrap_err();
        assert_eq!(
            err,
            FlowError::InvalidTransition {
                action: "confirm",
                state: "rejected"
            }
        );
        assert_eq!(flow.state(), &FlowState::Rejected);

        let mut flow = ConfirmationFlow::new();
        flow.submit(sample()).unwrap();
        let total = flow.confirm().unwrap().total;
        assert!(flow.confirm().is_err());
        assert_eq!(flow.confirmed().map(|a| a.total), Some(total));
    }

    #[test]
    fn double_submit_fails() {
        let mut flow = ConfirmationFlow::new();
        flow.submit(sample()).unwrap();
        assert!(flow.submit(sample()).is_err());
        assert!(flow.reject().is_ok());
        assert!(flow.reject().is_err());
    }

    #[test]
    fn edit_returns_to_draft() {
        let mut flow = ConfirmationFlow::new();
        flow.submit(sample()).unwrap();
        flow.confirm().unwrap();
        flow.edit();
        assert_eq!(flow.state(), &FlowState::Draft);
    }

    #[test]
    fn summary_lists_inputs_and_bmi() {
        let text = summary(&sample());
        assert!(text.starts_with("Please confirm the details below:"));
        assert!(text.contains("Height: 5'10\""));
        assert!(text.contains("Blood Pressure: 130/85 (stage 1)"));
        assert!(text.contains("Family History: none"));
        assert!(text.contains("Calculated BMI: 25.8 (overweight)"));
        assert!(text.ends_with("Is this information correct?"));
    }

    #[test]
    fn result_card_shows_points() {
        let text = render_result(&sample());
        assert!(text.contains("Score: 80"));
        assert!(text.contains("Risk Category: Decline"));
        assert!(text.contains("Blood Pressure: 30"));
    }
}
