//! Package Builder Wizard
//!
//! Owns the selection, the current step and the derived pricing of one
//! package-building session. Every change reprices the selection from
//! scratch and re-renders the attached view with a fresh snapshot.

use crate::api::{BookingConfirmation, OrderRequest, OrderService};
use crate::catalog::CatalogId;
use crate::error::WizardError;
use crate::pricing::{PricingBreakdown, RateSource};
use crate::selection::PackageSelection;
use crate::state::{WizardPhase, WizardSnapshot, WizardStep};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Receives a full snapshot after every state change
pub trait WizardView {
    fn render(&mut self, snapshot: &WizardSnapshot);
}

pub struct PackageBuilderWizard<R> {
    selection: PackageSelection,
    step: WizardStep,
    phase: WizardPhase,
    pricing: PricingBreakdown,
    rates: R,
    currency: String,
    view: Option<Box<dyn WizardView>>,
}

impl<R: RateSource> PackageBuilderWizard<R> {
    /// Start an empty session at the destination step
    pub fn new(rates: R, currency: impl Into<String>) -> Self {
        Self {
            selection: PackageSelection::new(),
            step: WizardStep::Destination,
            phase: WizardPhase::Editing,
            pricing: PricingBreakdown::default(),
            rates,
            currency: currency.into(),
            view: None,
        }
    }

    /// Attach a view and render the initial state into it
    pub fn with_view(mut self, view: Box<dyn WizardView>) -> Self {
        self.view = Some(view);
        self.render();
        self
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn phase(&self) -> &WizardPhase {
        &self.phase
    }

    pub fn selection(&self) -> &PackageSelection {
        &self.selection
    }

    pub fn pricing(&self) -> &PricingBreakdown {
        &self.pricing
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            step: self.step,
            phase: self.phase.clone(),
            selection: self.selection.clone(),
            pricing: self.pricing.clone(),
            currency: self.currency.clone(),
            completed: WizardStep::ALL.map(|s| self.validate(s)),
        }
    }

    // ========== Validation ==========

    /// Whether a step has everything it needs
    pub fn validate(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Destination => self.selection.destination_id.is_some(),
            WizardStep::Dates => self.selection.date_range.is_complete(),
            WizardStep::Accommodation => self.selection.accommodation_id.is_some(),
            WizardStep::Transportation => self.selection.transportation.flight_id.is_some(),
            WizardStep::Activities | WizardStep::Review => true,
        }
    }

    pub fn first_incomplete_step(&self) -> Option<WizardStep> {
        WizardStep::ALL.into_iter().find(|s| !self.validate(*s))
    }

    // ========== Navigation ==========

    /// Advance one step if the current one validates. No-op at review.
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_editable()?;

        if !self.validate(self.step) {
            debug!("Step {} incomplete, staying put", self.step.title());
            return Err(WizardError::StepIncomplete(self.step));
        }

        if let Some(next) = self.step.next() {
            self.move_to(next);
        }
        Ok(self.step)
    }

    pub fn previous(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_editable()?;

        let previous = self.step.previous().ok_or(WizardError::AtFirstStep)?;
        self.move_to(previous);
        Ok(self.step)
    }

    /// Jump backward freely, or forward when every earlier step validates
    pub fn jump_to(&mut self, target: WizardStep) -> Result<WizardStep, WizardError> {
        self.ensure_editable()?;

        if target > self.step {
            if let Some(blocking) = target
                .predecessors()
                .iter()
                .copied()
                .find(|s| !self.validate(*s))
            {
                return Err(WizardError::CannotJump { target, blocking });
            }
        }

        self.move_to(target);
        Ok(self.step)
    }

    fn move_to(&mut self, step: WizardStep) {
        if step != self.step {
            debug!("Step {} -> {}", self.step.title(), step.title());
            self.step = step;
            self.render();
        }
    }

    // ========== Selection ==========

    pub fn select_destination(&mut self, id: CatalogId) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.update(|selection| {
            selection.destination_id = Some(id);
            Ok(())
        })
    }

    pub fn set_dates(&mut self, check_in: NaiveDate, check_out: NaiveDate) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.update(|selection| selection.set_dates(check_in, check_out))
    }

    pub fn set_traveler_count(&mut self, count: u32) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.update(|selection| selection.set_traveler_count(count))
    }

    pub fn select_accommodation(&mut self, id: CatalogId) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.check_accommodation(&id)?;
        self.update(|selection| {
            selection.accommodation_id = Some(id);
            Ok(())
        })
    }

    pub fn select_flight(&mut self, id: CatalogId) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.check_flight(&id)?;
        self.update(|selection| {
            selection.transportation.flight_id = Some(id);
            Ok(())
        })
    }

    /// Pick a car rental, or `None` to drop it
    pub fn select_car_rental(&mut self, id: Option<CatalogId>) -> Result<(), WizardError> {
        self.ensure_editable()?;
        if let Some(id) = &id {
            self.check_car_rental(id)?;
        }
        self.update(|selection| {
            selection.transportation.car_rental_id = id;
            Ok(())
        })
    }

    /// Pick local transport, or `None` to drop it
    pub fn select_local_transport(&mut self, id: Option<CatalogId>) -> Result<(), WizardError> {
        self.ensure_editable()?;
        if let Some(id) = &id {
            self.check_local_transport(id)?;
        }
        self.update(|selection| {
            selection.transportation.local_transport_id = id;
            Ok(())
        })
    }

    /// Returns whether the activity is selected afterwards
    pub fn toggle_activity(&mut self, id: CatalogId) -> Result<bool, WizardError> {
        self.ensure_editable()?;
        self.update(|selection| Ok(selection.toggle_activity(id)))
    }

    /// Replace the whole selection, e.g. with one loaded from disk.
    ///
    /// If the loaded picks leave a step before the current one incomplete,
    /// the wizard moves back to that step.
    pub fn load_selection(&mut self, selection: PackageSelection) -> Result<(), WizardError> {
        self.ensure_editable()?;
        selection.check()?;

        if let Some(id) = &selection.accommodation_id {
            self.check_accommodation(id)?;
        }
        let transport = &selection.transportation;
        if let Some(id) = &transport.flight_id {
            self.check_flight(id)?;
        }
        if let Some(id) = &transport.car_rental_id {
            self.check_car_rental(id)?;
        }
        if let Some(id) = &transport.local_transport_id {
            self.check_local_transport(id)?;
        }

        self.commit(selection)?;
        if let Some(first) = self.first_incomplete_step() {
            if first < self.step {
                debug!("Loaded selection leaves {} incomplete", first.title());
                self.step = first;
            }
        }
        self.render();
        Ok(())
    }

    /// Discard everything and start over
    pub fn reset(&mut self) {
        self.selection = PackageSelection::new();
        self.pricing = PricingBreakdown::default();
        self.step = WizardStep::Destination;
        self.phase = WizardPhase::Editing;
        self.render();
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.phase.is_confirmed() {
            return Err(WizardError::AlreadyBooked);
        }
        Ok(())
    }

    fn check_accommodation(&self, id: &CatalogId) -> Result<(), WizardError> {
        match self.rates.nightly_rate(id) {
            Some(_) => Ok(()),
            None => Err(WizardError::UnknownSelection { kind: "accommodation", id: id.clone() }),
        }
    }

    fn check_flight(&self, id: &CatalogId) -> Result<(), WizardError> {
        match self.rates.flight_rate(id) {
            Some(_) => Ok(()),
            None => Err(WizardError::UnknownSelection { kind: "flight", id: id.clone() }),
        }
    }

    fn check_car_rental(&self, id: &CatalogId) -> Result<(), WizardError> {
        match self.rates.daily_car_rate(id) {
            Some(_) => Ok(()),
            None => Err(WizardError::UnknownSelection { kind: "car rental", id: id.clone() }),
        }
    }

    fn check_local_transport(&self, id: &CatalogId) -> Result<(), WizardError> {
        if self.rates.knows_local_transport(id) {
            Ok(())
        } else {
            Err(WizardError::UnknownSelection { kind: "local transport", id: id.clone() })
        }
    }

    /// Apply an edit to a copy of the selection, then commit and re-render.
    /// Nothing changes if the edit or the repricing fails.
    fn update<T>(
        &mut self,
        edit: impl FnOnce(&mut PackageSelection) -> Result<T, WizardError>,
    ) -> Result<T, WizardError> {
        let mut selection = self.selection.clone();
        let out = edit(&mut selection)?;
        self.commit(selection)?;
        self.render();
        Ok(out)
    }

    /// Reprice from scratch and take the new selection
    fn commit(&mut self, selection: PackageSelection) -> Result<(), WizardError> {
        let pricing = PricingBreakdown::try_compute(&selection, &self.rates).ok_or_else(|| {
            warn!("Package price overflowed, keeping the previous selection");
            WizardError::PriceOverflow
        })?;

        self.selection = selection;
        self.pricing = pricing;
        if matches!(self.phase, WizardPhase::SaveFailed { .. }) {
            self.phase = WizardPhase::Editing;
        }
        debug!("Repriced: total {} {}", self.pricing.total, self.currency);
        Ok(())
    }

    fn render(&mut self) {
        if self.view.is_some() {
            let snapshot = self.snapshot();
            if let Some(view) = self.view.as_mut() {
                view.render(&snapshot);
            }
        }
    }

    // ========== Booking ==========

    pub fn order_request(&self) -> OrderRequest {
        OrderRequest {
            selection: self.selection.clone(),
            pricing: self.pricing.clone(),
            currency: self.currency.clone(),
        }
    }

    /// Submit the package as an order
    ///
    /// Only allowed from the review step with every step complete. On
    /// failure the wizard stays at review with the selection intact and
    /// the error recorded in the phase; calling `save` again retries.
    pub async fn save(
        &mut self,
        orders: &dyn OrderService,
    ) -> Result<BookingConfirmation, WizardError> {
        self.ensure_editable()?;

        if self.step != WizardStep::Review {
            return Err(WizardError::NotAtReview);
        }
        if let Some(step) = self.first_incomplete_step() {
            return Err(WizardError::StepIncomplete(step));
        }

        let request = self.order_request();
        match orders.create_order(&request).await {
            Ok(confirmation) => {
                info!("Package booked: {}", confirmation.reference());
                self.phase = WizardPhase::Confirmed(confirmation.clone());
                self.render();
                Ok(confirmation)
            }
            Err(e) => {
                warn!("Booking failed: {}", e);
                self.phase = WizardPhase::SaveFailed { message: e.to_string() };
                self.render();
                Err(e.into())
            }
        }
    }
}
