//! Tripwise Library - build, price and book travel packages
//!
//! This library provides:
//! - The package builder wizard (step navigation and validation)
//! - Price aggregation over pluggable rate sources
//! - Catalog types and the booking backend client
//! - Configuration parsing
//! - A terminal front-end driven by wizard snapshots

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pricing;
pub mod selection;
pub mod state;
pub mod ui;
pub mod wizard;

pub use api::{BookingConfirmation, CatalogService, HttpBackend, OrderRequest, OrderService};
pub use catalog::{Catalog, CatalogId};
pub use error::{ApiError, WizardError};
pub use pricing::{CatalogRates, FixedRates, PricingBreakdown, RateSource};
pub use selection::PackageSelection;
pub use state::{WizardPhase, WizardSnapshot, WizardStep};
pub use wizard::{PackageBuilderWizard, WizardView};
