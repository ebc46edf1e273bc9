//! Package Summary - plain-text rendering of a wizard snapshot
//!
//! The whole summary is rebuilt from the snapshot every time; nothing is
//! patched in place.

use crate::catalog::{Catalog, CatalogId};
use crate::state::{WizardPhase, WizardSnapshot, WizardStep};
use crate::wizard::WizardView;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Format an amount with two decimals and the currency code
pub fn format_money(amount: Decimal, currency: &str) -> String {
    format!(
        "{:.2} {}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        currency
    )
}

/// Step progress line, e.g. `[1 Destination ✓] [2 Dates •] ...`
pub fn render_progress(snapshot: &WizardSnapshot) -> String {
    WizardStep::ALL
        .iter()
        .map(|step| {
            let marker = if *step == snapshot.step {
                "•"
            } else if snapshot.is_step_complete(*step) {
                "✓"
            } else {
                " "
            };
            format!("[{} {} {}]", step.number(), step.title(), marker)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render selection and price breakdown
pub fn render_summary(snapshot: &WizardSnapshot, catalog: &Catalog) -> String {
    Summary { snapshot, catalog }.to_string()
}

struct Summary<'a> {
    snapshot: &'a WizardSnapshot,
    catalog: &'a Catalog,
}

impl Summary<'_> {
    fn name(&self, id: &Option<CatalogId>) -> String {
        id.as_ref()
            .map(|id| self.catalog.display_name(id))
            .unwrap_or_else(|| "-".to_string())
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let selection = &self.snapshot.selection;
        let transport = &selection.transportation;
        let pricing = &self.snapshot.pricing;
        let currency = self.snapshot.currency.as_str();

        writeln!(f, "{}", render_progress(self.snapshot))?;
        writeln!(f)?;
        writeln!(f, "  Destination     {}", self.name(&selection.destination_id))?;

        let dates = &selection.date_range;
        match (dates.check_in, dates.check_out) {
            (Some(check_in), Some(check_out)) => writeln!(
                f,
                "  Dates           {} -> {} ({} night{})",
                check_in,
                check_out,
                selection.nights(),
                if selection.nights() == 1 { "" } else { "s" }
            )?,
            _ => writeln!(f, "  Dates           -")?,
        }
        writeln!(f, "  Travelers       {}", dates.traveler_count)?;
        writeln!(f, "  Accommodation   {}", self.name(&selection.accommodation_id))?;
        writeln!(f, "  Flight          {}", self.name(&transport.flight_id))?;
        writeln!(f, "  Car rental      {}", self.name(&transport.car_rental_id))?;
        writeln!(f, "  Local transport {}", self.name(&transport.local_transport_id))?;

        if selection.activity_ids.is_empty() {
            writeln!(f, "  Activities      -")?;
        } else {
            let names: Vec<_> = selection
                .activity_ids
                .iter()
                .map(|id| self.catalog.display_name(id))
                .collect();
            writeln!(f, "  Activities      {}", names.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "  Accommodation   {:>14}", format_money(pricing.accommodation, currency))?;
        writeln!(f, "  Transportation  {:>14}", format_money(pricing.transportation, currency))?;
        writeln!(f, "  Car rental      {:>14}", format_money(pricing.car_rental, currency))?;
        writeln!(f, "  Activities      {:>14}", format_money(pricing.activities, currency))?;
        writeln!(f, "  Total           {:>14}", format_money(pricing.total, currency))?;

        match &self.snapshot.phase {
            WizardPhase::Editing => Ok(()),
            WizardPhase::Confirmed(confirmation) => {
                writeln!(f)?;
                writeln!(f, "  Booked! Reference: {}", confirmation.reference())
            }
            WizardPhase::SaveFailed { message } => {
                writeln!(f)?;
                writeln!(f, "  Booking failed: {}", message)
            }
        }
    }
}

/// View that reprints the whole summary to the terminal
pub struct TerminalView {
    catalog: Catalog,
}

impl TerminalView {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl WizardView for TerminalView {
    fn render(&mut self, snapshot: &WizardSnapshot) {
        println!();
        print!("{}", render_summary(snapshot, &self.catalog));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Destination;
    use crate::pricing::FixedRates;
    use crate::wizard::PackageBuilderWizard;
    use chrono::NaiveDate;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::from(900), "USD"), "900.00 USD");
        assert_eq!(format_money(Decimal::new(12345, 3), "EUR"), "12.35 EUR");
    }

    #[test]
    fn test_summary_shows_names_and_totals() {
        let catalog = Catalog {
            destinations: vec![Destination {
                id: "1".into(),
                name: "Lisbon".into(),
                country: Some("Portugal".into()),
                description: None,
            }],
            ..Default::default()
        };

        let mut w = PackageBuilderWizard::new(FixedRates::default(), "USD");
        w.select_destination(CatalogId::from(1u64)).unwrap();
        w.set_dates(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
        )
        .unwrap();
        w.set_traveler_count(2).unwrap();
        w.select_accommodation("h1".into()).unwrap();

        let text = render_summary(&w.snapshot(), &catalog);
        assert!(text.contains("Destination     Lisbon"));
        assert!(text.contains("(3 nights)"));
        assert!(text.contains("Accommodation   h1"));
        assert!(text.contains("900.00 USD"));
        assert!(text.contains("[1 Destination •]"));
    }

    #[test]
    fn test_summary_reports_failed_save() {
        let mut snapshot = PackageBuilderWizard::new(FixedRates::default(), "EUR").snapshot();
        snapshot.phase = WizardPhase::SaveFailed {
            message: "service unavailable".to_string(),
        };

        let text = render_summary(&snapshot, &Catalog::default());
        assert!(text.contains("Dates           -\n"));
        assert!(text.contains("Activities      -\n"));
        assert!(text.contains("0.00 EUR"));
        assert!(text.ends_with("  Booking failed: service unavailable\n"));
    }

    #[test]
    fn test_progress_marks_completed_steps() {
        let mut w = PackageBuilderWizard::new(FixedRates::default(), "USD");
        w.select_destination("lisbon".into()).unwrap();
        w.next().unwrap();

        let progress = render_progress(&w.snapshot());
        assert!(progress.starts_with("[1 Destination ✓] [2 Dates •]"));
        assert!(progress.contains("[3 Accommodation  ]"));
    }
}
