//! Transportation Page - flight (required), car rental and local transport

use super::{pick_one, report, Page, Pick};
use crate::catalog::{Catalog, CatalogId, TransportKind, TransportOption};
use crate::pricing::RateSource;
use crate::ui::summary::format_money;
use crate::wizard::PackageBuilderWizard;
use anyhow::Result;

pub struct TransportPage;

fn options_of(catalog: &Catalog, kind: TransportKind, currency: &str) -> Vec<(CatalogId, String)> {
    catalog
        .transport_of_kind(kind)
        .map(|t: &TransportOption| {
            let label = match (t.price_per_day, t.price) {
                (Some(daily), _) => format!("{} - {} / day", t.name, format_money(daily, currency)),
                (None, Some(price)) => format!("{} - {}", t.name, format_money(price, currency)),
                (None, None) => t.name.clone(),
            };
            (t.id.clone(), label)
        })
        .collect()
}

impl<R: RateSource> Page<R> for TransportPage {
    fn show(&self, wizard: &mut PackageBuilderWizard<R>, catalog: &Catalog) -> Result<()> {
        let currency = wizard.currency().to_string();
        let current = wizard.selection().transportation.clone();

        let flights = options_of(catalog, TransportKind::Flight, &currency);
        if let Pick::Choose(id) = pick_one("Flight", &flights, current.flight_id.as_ref(), false)? {
            report(wizard.select_flight(id));
        }

        let cars = options_of(catalog, TransportKind::CarRental, &currency);
        match pick_one("Car rental", &cars, current.car_rental_id.as_ref(), true)? {
            Pick::Keep => {}
            Pick::Clear => report(wizard.select_car_rental(None)),
            Pick::Choose(id) => report(wizard.select_car_rental(Some(id))),
        }

        let local = options_of(catalog, TransportKind::LocalTransport, &currency);
        match pick_one("Local transport", &local, current.local_transport_id.as_ref(), true)? {
            Pick::Keep => {}
            Pick::Clear => report(wizard.select_local_transport(None)),
            Pick::Choose(id) => report(wizard.select_local_transport(Some(id))),
        }

        Ok(())
    }
}
