//! Accommodation Page

use super::{pick_one, report, Page, Pick};
use crate::catalog::{Accommodation, Catalog};
use crate::pricing::RateSource;
use crate::ui::summary::format_money;
use crate::wizard::PackageBuilderWizard;
use anyhow::Result;

pub struct LodgingPage;

impl<R: RateSource> Page<R> for LodgingPage {
    fn show(&self, wizard: &mut PackageBuilderWizard<R>, catalog: &Catalog) -> Result<()> {
        let available: Vec<&Accommodation> = match &wizard.selection().destination_id {
            Some(destination) => catalog.accommodations_for(destination).collect(),
            None => catalog.accommodations.iter().collect(),
        };

        let options: Vec<_> = available
            .into_iter()
            .map(|a| {
                let label = format!(
                    "{} - {} / night",
                    a.name,
                    format_money(a.price_per_night, wizard.currency())
                );
                (a.id.clone(), label)
            })
            .collect();

        let current = wizard.selection().accommodation_id.clone();
        if let Pick::Choose(id) = pick_one("Where will you stay?", &options, current.as_ref(), false)? {
            report(wizard.select_accommodation(id));
        }
        Ok(())
    }
}
