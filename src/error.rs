//! Error types for the wizard and the backend client

use crate::catalog::CatalogId;
use crate::state::WizardStep;
use chrono::NaiveDate;
use thiserror::Error;

/// Failures talking to the booking backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS)
    #[error("could not reach the booking service: {0}")]
    Transport(String),

    /// The backend answered with an error payload
    #[error("booking service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The backend answered with something we could not parse
    #[error("unexpected response from the booking service: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::MalformedResponse(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("the {} step is not complete", .0.title())]
    StepIncomplete(WizardStep),

    #[error("already at the first step")]
    AtFirstStep,

    #[error("cannot jump to {}: the {} step is not complete", .target.title(), .blocking.title())]
    CannotJump { target: WizardStep, blocking: WizardStep },

    #[error("check-out {check_out} is before check-in {check_in}")]
    InvalidDateRange { check_in: NaiveDate, check_out: NaiveDate },

    #[error("traveler count must be at least 1, got {0}")]
    InvalidTravelerCount(u32),

    #[error("no {kind} with id {id} is available")]
    UnknownSelection { kind: &'static str, id: CatalogId },

    #[error("the package price is too large to compute")]
    PriceOverflow,

    #[error("the package can only be booked from the review step")]
    NotAtReview,

    #[error("this package has already been booked")]
    AlreadyBooked,

    #[error(transparent)]
    Submission(#[from] ApiError),
}
