//! Pricing Aggregator
//!
//! Turns a selection into a price breakdown. The breakdown is always
//! rebuilt from the full selection; nothing is patched incrementally.

use crate::catalog::{Catalog, CatalogId, TransportKind};
use crate::selection::PackageSelection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Unit prices used by the pricing formula
///
/// Lookups return `None` for ids the source does not know about.
pub trait RateSource {
    fn nightly_rate(&self, accommodation: &CatalogId) -> Option<Decimal>;

    /// Per-traveller flight price
    fn flight_rate(&self, flight: &CatalogId) -> Option<Decimal>;

    fn daily_car_rate(&self, car: &CatalogId) -> Option<Decimal>;

    /// Per-traveller price of a single activity
    fn activity_rate(&self) -> Decimal;

    /// Whether a local transport pick is known. It is not priced.
    fn knows_local_transport(&self, _local: &CatalogId) -> bool {
        true
    }
}

/// Cost of a package, split by component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub accommodation: Decimal,
    pub transportation: Decimal,
    pub car_rental: Decimal,
    pub activities: Decimal,
    pub total: Decimal,
}

impl PricingBreakdown {
    /// Price a selection from scratch
    ///
    /// Returns `None` when an amount does not fit in a `Decimal`.
    pub fn try_compute<R: RateSource + ?Sized>(selection: &PackageSelection, rates: &R) -> Option<Self> {
        let nights = Decimal::from(selection.nights());
        let travelers = Decimal::from(selection.travelers());

        let accommodation = match selection
            .accommodation_id
            .as_ref()
            .and_then(|id| rates.nightly_rate(id))
        {
            Some(rate) => rate.checked_mul(nights)?.checked_mul(travelers)?,
            None => Decimal::ZERO,
        };

        let transportation = match selection
            .transportation
            .flight_id
            .as_ref()
            .and_then(|id| rates.flight_rate(id))
        {
            Some(rate) => rate.checked_mul(travelers)?,
            None => Decimal::ZERO,
        };

        let car_rental = match selection
            .transportation
            .car_rental_id
            .as_ref()
            .and_then(|id| rates.daily_car_rate(id))
        {
            Some(rate) => rate.checked_mul(nights)?,
            None => Decimal::ZERO,
        };

        let activities = Decimal::from(selection.activity_ids.len() as u64)
            .checked_mul(rates.activity_rate())?
            .checked_mul(travelers)?;

        let total = accommodation
            .checked_add(transportation)?
            .checked_add(car_rental)?
            .checked_add(activities)?;

        Some(Self {
            accommodation,
            transportation,
            car_rental,
            activities,
            total,
        })
    }

    /// Sum of the four components
    pub fn components_sum(&self) -> Decimal {
        self.accommodation + self.transportation + self.car_rental + self.activities
    }
}

/// Placeholder rate table: the same unit price for every id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedRates {
    pub nightly: Decimal,
    pub flight: Decimal,
    pub car_daily: Decimal,
    pub activity: Decimal,
}

impl Default for FixedRates {
    fn default() -> Self {
        Self {
            nightly: Decimal::from(150),
            flight: Decimal::from(300),
            car_daily: Decimal::from(45),
            activity: Decimal::from(50),
        }
    }
}

impl RateSource for FixedRates {
    fn nightly_rate(&self, _accommodation: &CatalogId) -> Option<Decimal> {
        Some(self.nightly)
    }

    fn flight_rate(&self, _flight: &CatalogId) -> Option<Decimal> {
        Some(self.flight)
    }

    fn daily_car_rate(&self, _car: &CatalogId) -> Option<Decimal> {
        Some(self.car_daily)
    }

    fn activity_rate(&self) -> Decimal {
        self.activity
    }
}

/// Rates read from catalog records
///
/// Activities have no per-record price in the catalog, so they keep a flat
/// rate.
#[derive(Debug, Clone, Default)]
pub struct CatalogRates {
    nightly: HashMap<CatalogId, Decimal>,
    flights: HashMap<CatalogId, Decimal>,
    cars: HashMap<CatalogId, Decimal>,
    local: HashSet<CatalogId>,
    activity: Decimal,
}

impl CatalogRates {
    pub fn from_catalog(catalog: &Catalog, activity_rate: Decimal) -> Self {
        let mut rates = Self {
            activity: activity_rate,
            ..Default::default()
        };

        for accommodation in &catalog.accommodations {
            rates
                .nightly
                .insert(accommodation.id.clone(), accommodation.price_per_night);
        }

        for option in &catalog.transport_options {
            match option.kind {
                TransportKind::Flight => {
                    if let Some(price) = option.price {
                        rates.flights.insert(option.id.clone(), price);
                    }
                }
                TransportKind::CarRental => {
                    if let Some(price) = option.price_per_day.or(option.price) {
                        rates.cars.insert(option.id.clone(), price);
                    }
                }
                TransportKind::LocalTransport => {
                    rates.local.insert(option.id.clone());
                }
            }
        }

        tracing::debug!(
            "Catalog rates: {} accommodations, {} flights, {} car rentals",
            rates.nightly.len(),
            rates.flights.len(),
            rates.cars.len()
        );

        rates
    }
}

impl RateSource for CatalogRates {
    fn nightly_rate(&self, accommodation: &CatalogId) -> Option<Decimal> {
        self.nightly.get(accommodation).copied()
    }

    fn flight_rate(&self, flight: &CatalogId) -> Option<Decimal> {
        self.flights.get(flight).copied()
    }

    fn daily_car_rate(&self, car: &CatalogId) -> Option<Decimal> {
        self.cars.get(car).copied()
    }

    fn activity_rate(&self) -> Decimal {
        self.activity
    }

    fn knows_local_transport(&self, local: &CatalogId) -> bool {
        self.local.contains(local)
    }
}
