//! Catalog Records
//!
//! Typed records for the catalog lists served by the booking backend:
//! destinations, accommodations, transport options and activities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque catalog identifier
///
/// The backend hands out both numeric and string ids, so numbers are
/// accepted on the wire and kept as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CatalogId(String);

impl CatalogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CatalogId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CatalogId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for CatalogId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for CatalogId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => CatalogId(s),
            RawId::Number(n) => CatalogId::from(n),
        })
    }
}

/// A travel destination
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: CatalogId,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A hotel or other lodging offer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub id: CatalogId,
    pub name: String,
    #[serde(default)]
    pub destination_id: Option<CatalogId>,
    pub price_per_night: Decimal,
    #[serde(default)]
    pub rating: Option<f32>,
}

/// Kind of transport offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportKind {
    Flight,
    CarRental,
    LocalTransport,
}

impl TransportKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransportKind::Flight => "Flight",
            TransportKind::CarRental => "Car rental",
            TransportKind::LocalTransport => "Local transport",
        }
    }
}

/// A flight, car rental, or local transport offer
///
/// Flights and local transport carry a flat `price`; car rentals are
/// priced per day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportOption {
    pub id: CatalogId,
    pub kind: TransportKind,
    pub name: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub price_per_day: Option<Decimal>,
}

/// A bookable activity or excursion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: CatalogId,
    pub name: String,
    #[serde(default)]
    pub destination_id: Option<CatalogId>,
    #[serde(default)]
    pub duration_hours: Option<f32>,
}

/// All catalog lists needed to drive one wizard session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub destinations: Vec<Destination>,
    pub accommodations: Vec<Accommodation>,
    pub transport_options: Vec<TransportOption>,
    pub activities: Vec<Activity>,
}

impl Catalog {
    pub fn destination(&self, id: &CatalogId) -> Option<&Destination> {
        self.destinations.iter().find(|d| &d.id == id)
    }

    pub fn accommodation(&self, id: &CatalogId) -> Option<&Accommodation> {
        self.accommodations.iter().find(|a| &a.id == id)
    }

    pub fn transport(&self, id: &CatalogId) -> Option<&TransportOption> {
        self.transport_options.iter().find(|t| &t.id == id)
    }

    pub fn activity(&self, id: &CatalogId) -> Option<&Activity> {
        self.activities.iter().find(|a| &a.id == id)
    }

    /// Accommodations located at a destination
    ///
    /// Records without a destination are offered everywhere.
    pub fn accommodations_for<'a>(
        &'a self,
        destination: &'a CatalogId,
    ) -> impl Iterator<Item = &'a Accommodation> + 'a {
        self.accommodations
            .iter()
            .filter(move |a| a.destination_id.as_ref().map_or(true, |d| d == destination))
    }

    /// Activities offered at a destination
    pub fn activities_for<'a>(
        &'a self,
        destination: &'a CatalogId,
    ) -> impl Iterator<Item = &'a Activity> + 'a {
        self.activities
            .iter()
            .filter(move |a| a.destination_id.as_ref().map_or(true, |d| d == destination))
    }

    pub fn transport_of_kind(&self, kind: TransportKind) -> impl Iterator<Item = &TransportOption> {
        self.transport_options.iter().filter(move |t| t.kind == kind)
    }

    /// Human-readable name for any catalog id, falling back to the raw id
    pub fn display_name(&self, id: &CatalogId) -> String {
        self.destination(id)
            .map(|d| d.name.clone())
            .or_else(|| self.accommodation(id).map(|a| a.name.clone()))
            .or_else(|| self.transport(id).map(|t| t.name.clone()))
            .or_else(|| self.activity(id).map(|a| a.name.clone()))
            .unwrap_or_else(|| id.to_string())
    }
}
