//! Package Selection
//!
//! The picks accumulated while the traveller walks through the wizard.

use crate::catalog::CatalogId;
use crate::error::WizardError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Travel dates and party size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub traveler_count: u32,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            check_in: None,
            check_out: None,
            traveler_count: 1,
        }
    }
}

impl DateRange {
    /// Both ends of the stay are known
    pub fn is_complete(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some()
    }

    /// Nights between check-in and check-out, never less than 1
    pub fn nights(&self) -> u32 {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => {
                let days = (check_out - check_in).num_days();
                u32::try_from(days).unwrap_or(0).max(1)
            }
            _ => 1,
        }
    }
}

/// Transport picks; only the flight is required
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transportation {
    pub flight_id: Option<CatalogId>,
    pub car_rental_id: Option<CatalogId>,
    pub local_transport_id: Option<CatalogId>,
}

/// Everything the traveller has picked so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSelection {
    pub destination_id: Option<CatalogId>,
    #[serde(default)]
    pub date_range: DateRange,
    pub accommodation_id: Option<CatalogId>,
    #[serde(default)]
    pub transportation: Transportation,
    #[serde(default)]
    pub activity_ids: BTreeSet<CatalogId>,
}

impl PackageSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both stay dates, rejecting a check-out before the check-in
    pub fn set_dates(&mut self, check_in: NaiveDate, check_out: NaiveDate) -> Result<(), WizardError> {
        if check_out < check_in {
            return Err(WizardError::InvalidDateRange { check_in, check_out });
        }
        self.date_range.check_in = Some(check_in);
        self.date_range.check_out = Some(check_out);
        Ok(())
    }

    pub fn set_traveler_count(&mut self, count: u32) -> Result<(), WizardError> {
        if count == 0 {
            return Err(WizardError::InvalidTravelerCount(count));
        }
        self.date_range.traveler_count = count;
        Ok(())
    }

    /// Add the activity if absent, remove it if present.
    /// Returns whether the activity is selected afterwards.
    pub fn toggle_activity(&mut self, id: CatalogId) -> bool {
        if self.activity_ids.remove(&id) {
            false
        } else {
            self.activity_ids.insert(id);
            true
        }
    }

    pub fn nights(&self) -> u32 {
        self.date_range.nights()
    }

    pub fn travelers(&self) -> u32 {
        self.date_range.traveler_count
    }

    /// Check the invariants a deserialized selection may have broken
    pub fn check(&self) -> Result<(), WizardError> {
        if let (Some(check_in), Some(check_out)) = (self.date_range.check_in, self.date_range.check_out) {
            if check_out < check_in {
                return Err(WizardError::InvalidDateRange { check_in, check_out });
            }
        }
        if self.date_range.traveler_count == 0 {
            return Err(WizardError::InvalidTravelerCount(0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_nights() {
        let mut selection = PackageSelection::new();
        assert_eq!(selection.nights(), 1);

        selection.set_dates(date("2024-06-01"), date("2024-06-04")).unwrap();
        assert_eq!(selection.nights(), 3);

        // Same-day stays still count one night
        selection.set_dates(date("2024-06-01"), date("2024-06-01")).unwrap();
        assert_eq!(selection.nights(), 1);
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let mut selection = PackageSelection::new();
        selection.set_dates(date("2024-06-01"), date("2024-06-04")).unwrap();

        let err = selection.set_dates(date("2024-06-04"), date("2024-06-01")).unwrap_err();
        assert!(matches!(err, WizardError::InvalidDateRange { .. }));
        // Previous dates survive
        assert_eq!(selection.date_range.check_in, Some(date("2024-06-01")));
    }

    #[test]
    fn test_zero_travelers_rejected() {
        let mut selection = PackageSelection::new();
        assert!(selection.set_traveler_count(0).is_err());
        assert_eq!(selection.travelers(), 1);
        selection.set_traveler_count(4).unwrap();
        assert_eq!(selection.travelers(), 4);
    }

    #[test]
    fn test_toggle_activity() {
        let mut selection = PackageSelection::new();
        assert!(selection.toggle_activity("tram-28".into()));
        assert!(selection.toggle_activity("fado".into()));
        assert!(!selection.toggle_activity("tram-28".into()));
        assert_eq!(selection.activity_ids.len(), 1);
        assert!(selection.activity_ids.contains(&CatalogId::from("fado")));
    }

    #[test]
    fn test_camel_case_wire_format() {
        let mut selection = PackageSelection::new();
        selection.destination_id = Some(CatalogId::from(1u64));
        selection.set_dates(date("2024-06-01"), date("2024-06-04")).unwrap();

        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["destinationId"], "1");
        assert_eq!(json["dateRange"]["checkIn"], "2024-06-01");
        assert_eq!(json["dateRange"]["travelerCount"], 1);
        assert!(json["transportation"]["flightId"].is_null());
    }

    #[test]
    fn test_check_catches_bad_saved_selection() {
        let json = r#"{
            "destinationId": "1",
            "dateRange": {"checkIn": "2024-06-04", "checkOut": "2024-06-01", "travelerCount": 2}
        }"#;
        let selection: PackageSelection = serde_json::from_str(json).unwrap();
        assert!(selection.check().is_err());
    }
}
