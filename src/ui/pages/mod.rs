//! Wizard Pages - one interactive prompt per step

mod activities;
mod dates;
mod destination;
mod lodging;
mod review;
mod transport;

pub use activities::ActivitiesPage;
pub use dates::DatesPage;
pub use destination::DestinationPage;
pub use lodging::LodgingPage;
pub use review::ReviewPage;
pub use transport::TransportPage;

use crate::catalog::{Catalog, CatalogId};
use crate::pricing::RateSource;
use crate::wizard::PackageBuilderWizard;
use anyhow::Result;
use dialoguer::Select;

/// One screen of the terminal wizard
pub trait Page<R: RateSource> {
    /// Prompt for this step's picks and apply them to the wizard
    fn show(&self, wizard: &mut PackageBuilderWizard<R>, catalog: &Catalog) -> Result<()>;
}

/// Result of a single-choice prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    Keep,
    Clear,
    Choose(CatalogId),
}

/// Offer a list of catalog entries, plus "keep" when something is
/// already picked and "none" when the pick is optional
pub fn pick_one(
    prompt: &str,
    options: &[(CatalogId, String)],
    current: Option<&CatalogId>,
    optional: bool,
) -> Result<Pick> {
    let mut labels: Vec<String> = Vec::with_capacity(options.len() + 2);
    let mut picks: Vec<Pick> = Vec::with_capacity(options.len() + 2);

    if current.is_some() {
        labels.push("Keep current choice".to_string());
        picks.push(Pick::Keep);
    }
    if optional {
        labels.push("None".to_string());
        picks.push(Pick::Clear);
    }
    for (id, label) in options {
        let marker = if Some(id) == current { " (current)" } else { "" };
        labels.push(format!("{}{}", label, marker));
        picks.push(Pick::Choose(id.clone()));
    }

    if picks.is_empty() {
        println!("  Nothing available for this step.");
        return Ok(Pick::Keep);
    }

    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(picks[index].clone())
}

/// Report a rejected pick without leaving the wizard
pub(crate) fn report(result: Result<(), crate::error::WizardError>) {
    if let Err(e) = result {
        eprintln!("  {}", e);
    }
}
