//! Destination Page

use super::{pick_one, report, Page, Pick};
use crate::catalog::Catalog;
use crate::pricing::RateSource;
use crate::wizard::PackageBuilderWizard;
use anyhow::Result;

pub struct DestinationPage;

impl<R: RateSource> Page<R> for DestinationPage {
    fn show(&self, wizard: &mut PackageBuilderWizard<R>, catalog: &Catalog) -> Result<()> {
        let options: Vec<_> = catalog
            .destinations
            .iter()
            .map(|d| {
                let label = match &d.country {
                    Some(country) => format!("{}, {}", d.name, country),
                    None => d.name.clone(),
                };
                (d.id.clone(), label)
            })
            .collect();

        let current = wizard.selection().destination_id.clone();
        if let Pick::Choose(id) = pick_one("Where to?", &options, current.as_ref(), false)? {
            report(wizard.select_destination(id));
        }
        Ok(())
    }
}
