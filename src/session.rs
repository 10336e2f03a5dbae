//! One user's pass through the form: validate, score, confirm.
//!
//! Scoring runs locally or on a remote server; both paths validate first
//! and both end in `PendingConfirmation`. `evaluate` takes `&mut self`, so
//! a session can never have two requests in flight.

use crate::client::{ClientError, RiskClient};
use crate::confirmation::{ConfirmationFlow, FlowError};
use crate::models::RiskAssessment;
use crate::scoring;
use crate::validation::{validate_form, FieldErrors, RiskForm};

/// Where the score is computed.
#[derive(Debug, Clone)]
pub enum ScoringMode {
    Local,
    Remote(RiskClient),
}

impl ScoringMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote(_) => "remote",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid input: {0}")]
    Invalid(FieldErrors),
    #[error("Server not reachable at {0}")]
    Unreachable(String),
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Remote(ClientError),
}

impl From<ClientError> for SessionError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unreachable(base) => SessionError::Unreachable(base),
            other => match other.field_errors() {
                Some(errors) => SessionError::Invalid(errors),
                None => SessionError::Remote(other),
            },
        }
    }
}

#[derive(Debug)]
pub struct RiskSession {
    mode: ScoringMode,
    flow: ConfirmationFlow,
}

impl RiskSession {
    pub fn new(mode: ScoringMode) -> Self {
        Self {
            mode,
            flow: ConfirmationFlow::new(),
        }
    }

    pub fn mode(&self) -> &ScoringMode {
        &self.mode
    }

    pub fn flow(&self) -> &ConfirmationFlow {
        &self.flow
    }

    /// Validate and score a form, leaving the result pending confirmation.
    pub async fn evaluate(&mut self, form: &RiskForm) -> Result<&RiskAssessment, SessionError> {
        // Editing after a confirmed result starts a fresh draft.
        if self.flow.confirmed().is_some() {
            self.flow.edit();
        }

        let input = validate_form(form).map_err(SessionError::Invalid)?;

        let assessment = match &self.mode {
            ScoringMode::Local => scoring::assess(&input),
            ScoringMode::Remote(client) => client.assess(&input).await?,
        };

        tracing::debug!(
            mode = self.mode.name(),
            total = assessment.total,
            "Assessment ready for confirmation"
        );

        self.flow.submit(assessment)?;
        self.flow
            .pending()
            .ok_or(SessionError::Flow(FlowError::InvalidTransition {
                action: "evaluate",
                state: self.flow.state().name(),
            }))
    }

    pub fn confirm(&mut self) -> Result<&RiskAssessment, SessionError> {
        Ok(self.flow.confirm()?)
    }

    pub fn reject(&mut self) -> Result<(), SessionError> {
        Ok(self.flow.reject()?)
    }

    /// Back to editing, dropping any pending or confirmed result.
    pub fn edit(&mut self) {
        self.flow.edit();
    }
}
