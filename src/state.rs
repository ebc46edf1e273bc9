//! Wizard Steps and Lifecycle
//!
//! The ordered steps of the package builder, the lifecycle phase of a
//! wizard session, and the snapshot handed to views after every change.

use crate::api::BookingConfirmation;
use crate::pricing::PricingBreakdown;
use crate::selection::PackageSelection;
use serde::Serialize;

/// One screen of the package builder, in flow order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WizardStep {
    Destination,
    Dates,
    Accommodation,
    Transportation,
    Activities,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Destination,
        WizardStep::Dates,
        WizardStep::Accommodation,
        WizardStep::Transportation,
        WizardStep::Activities,
        WizardStep::Review,
    ];

    /// 1-based position in the flow
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn from_number(number: usize) -> Option<Self> {
        number.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn is_first(self) -> bool {
        self == WizardStep::Destination
    }

    pub fn is_last(self) -> bool {
        self == WizardStep::Review
    }

    /// Steps strictly before this one
    pub fn predecessors(self) -> &'static [WizardStep] {
        let all: &'static [WizardStep; 6] = &Self::ALL;
        &all[..self as usize]
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Destination => "Destination",
            WizardStep::Dates => "Dates",
            WizardStep::Accommodation => "Accommodation",
            WizardStep::Transportation => "Transportation",
            WizardStep::Activities => "Activities",
            WizardStep::Review => "Review",
        }
    }
}

/// Where a wizard session is in its lifecycle
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum WizardPhase {
    /// Picks are still being made
    #[default]
    Editing,

    /// The order was accepted by the backend
    Confirmed(BookingConfirmation),

    /// The last save attempt failed; the selection is kept for a manual retry
    SaveFailed { message: String },
}

impl WizardPhase {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, WizardPhase::Confirmed(_))
    }
}

/// Immutable view of the wizard after a change
#[derive(Debug, Clone, Serialize)]
pub struct WizardSnapshot {
    pub step: WizardStep,
    pub phase: WizardPhase,
    pub selection: PackageSelection,
    pub pricing: PricingBreakdown,
    pub currency: String,
    /// Validation result per step, in flow order
    pub completed: [bool; 6],
}

impl WizardSnapshot {
    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        self.completed[step as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_numbering() {
        assert_eq!(WizardStep::Destination.number(), 1);
        assert_eq!(WizardStep::Review.number(), 6);
        assert_eq!(WizardStep::from_number(3), Some(WizardStep::Accommodation));
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(7), None);
    }

    #[test]
    fn test_step_neighbours() {
        assert_eq!(WizardStep::Destination.previous(), None);
        assert_eq!(WizardStep::Destination.next(), Some(WizardStep::Dates));
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::Review.previous(), Some(WizardStep::Activities));
    }

    #[test]
    fn test_predecessors() {
        assert!(WizardStep::Destination.predecessors().is_empty());
        assert_eq!(
            WizardStep::Accommodation.predecessors(),
            &[WizardStep::Destination, WizardStep::Dates]
        );
        assert_eq!(WizardStep::Review.predecessors(), &WizardStep::ALL[..5]);
    }
}
