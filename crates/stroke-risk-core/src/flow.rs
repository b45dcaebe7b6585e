//! Screening form flow.
//!
//! ```text
//! Registration --SubmitName--> Details --SubmitDetails--> Results
//!      ^                                                     |
//!      +----------------------- Restart ---------------------+
//! ```
//!
//! The pipeline runs only on the Details → Results edge. A rejected event
//! returns an error and the caller keeps its current state.

use thiserror::Error;

use crate::export::Report;
use crate::models::{PatientForm, PatientInput, ValidationError};
use crate::pipeline::{PipelineError, RiskEngine};

/// Where the user is in the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Registration,
    Details { patient_name: String },
    /// Holds the last report for re-display
    Results { patient_name: String, report: Report },
}

/// User actions.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    SubmitName(String),
    SubmitDetails(PatientForm),
    Restart,
}

/// Why an event was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Please enter a valid name.")]
    InvalidName,

    #[error("{0}")]
    Validation(ValidationError),

    #[error("assessment failed: {0}")]
    Pipeline(PipelineError),

    #[error("cannot {event} while on the {state} page")]
    UnexpectedEvent {
        state: &'static str,
        event: &'static str,
    },
}

impl From<PipelineError> for FlowError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Validation(v) => FlowError::Validation(v),
            other => FlowError::Pipeline(other),
        }
    }
}

impl FlowState {
    /// Page name for messages.
    pub fn page(&self) -> &'static str {
        match self {
            FlowState::Registration => "registration",
            FlowState::Details { .. } => "details",
            FlowState::Results { .. } => "results",
        }
    }

    pub fn report(&self) -> Option<&Report> {
        match self {
            FlowState::Results { report, .. } => Some(report),
            _ => None,
        }
    }
}

impl FlowEvent {
    fn name(&self) -> &'static str {
        match self {
            FlowEvent::SubmitName(_) => "submit a name",
            FlowEvent::SubmitDetails(_) => "submit details",
            FlowEvent::Restart => "restart",
        }
    }
}

/// Compute the next state for `event`.
pub fn transition(
    state: &FlowState,
    event: FlowEvent,
    engine: &RiskEngine,
) -> Result<FlowState, FlowError> {
    match (state, event) {
        (_, FlowEvent::Restart) => Ok(FlowState::Registration),

        (FlowState::Registration, FlowEvent::SubmitName(name)) => {
            if name.trim().is_empty() {
                Err(FlowError::InvalidName)
            } else {
                Ok(FlowState::Details { patient_name: name })
            }
        }

        (FlowState::Details { patient_name }, FlowEvent::SubmitDetails(form)) => {
            let input =
                PatientInput::from_form(patient_name, &form).map_err(FlowError::Validation)?;
            let report = engine.assess(&input)?;

            Ok(FlowState::Results {
                patient_name: patient_name.clone(),
                report,
            })
        }

        (state, event) => Err(FlowError::UnexpectedEvent {
            state: state.page(),
            event: event.name(),
        }),
    }
}
