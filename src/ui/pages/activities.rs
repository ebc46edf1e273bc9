//! Activities Page - optional multi-pick

use super::Page;
use crate::catalog::{Activity, Catalog};
use crate::pricing::RateSource;
use crate::wizard::PackageBuilderWizard;
use anyhow::Result;
use dialoguer::MultiSelect;

pub struct ActivitiesPage;

impl<R: RateSource> Page<R> for ActivitiesPage {
    fn show(&self, wizard: &mut PackageBuilderWizard<R>, catalog: &Catalog) -> Result<()> {
        let available: Vec<&Activity> = match &wizard.selection().destination_id {
            Some(destination) => catalog.activities_for(destination).collect(),
            None => catalog.activities.iter().collect(),
        };
        if available.is_empty() {
            println!("  No activities offered here.");
            return Ok(());
        }

        let selected = &wizard.selection().activity_ids;
        let labels: Vec<&str> = available.iter().map(|a| a.name.as_str()).collect();
        let defaults: Vec<bool> = available.iter().map(|a| selected.contains(&a.id)).collect();

        let chosen = MultiSelect::new()
            .with_prompt("Activities (space to toggle, enter to confirm)")
            .items(&labels)
            .defaults(&defaults)
            .interact()?;

        // Toggle only what changed so each change reprices once
        let toggles: Vec<_> = available
            .iter()
            .enumerate()
            .filter(|(i, _)| chosen.contains(i) != defaults[*i])
            .map(|(_, a)| a.id.clone())
            .collect();

        for id in toggles {
            wizard.toggle_activity(id)?;
        }
        Ok(())
    }
}
