//! Review Page

use super::Page;
use crate::catalog::Catalog;
use crate::pricing::RateSource;
use crate::state::WizardStep;
use crate::wizard::PackageBuilderWizard;
use anyhow::Result;

pub struct ReviewPage;

impl<R: RateSource> Page<R> for ReviewPage {
    fn show(&self, wizard: &mut PackageBuilderWizard<R>, _catalog: &Catalog) -> Result<()> {
        match wizard.first_incomplete_step() {
            Some(step) => println!(
                "  Step {} ({}) still needs a choice before booking.",
                step.number(),
                step.title()
            ),
            None => println!(
                "  Everything is set. Choose \"Book\" to place the order ({} steps complete).",
                WizardStep::ALL.len()
            ),
        }
        Ok(())
    }
}
