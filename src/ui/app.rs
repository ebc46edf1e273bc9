//! Tripwise Application - interactive wizard loop
//!
//! Shows the page for the current step, then asks where to go next.

use crate::api::{BookingConfirmation, OrderService};
use crate::catalog::Catalog;
use crate::pricing::RateSource;
use crate::state::WizardStep;
use crate::ui::pages::{
    ActivitiesPage, DatesPage, DestinationPage, LodgingPage, Page, ReviewPage, TransportPage,
};
use crate::wizard::PackageBuilderWizard;
use anyhow::Result;
use dialoguer::Select;

/// How an interactive session ended
#[derive(Debug)]
pub enum Outcome {
    Booked(BookingConfirmation),
    Abandoned,
}

/// Navigation choices offered after each page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    Edit,
    Next,
    Back,
    Jump,
    Book,
    Quit,
}

impl Nav {
    fn label(self) -> &'static str {
        match self {
            Nav::Edit => "Change selections",
            Nav::Next => "Next step",
            Nav::Back => "Previous step",
            Nav::Jump => "Jump to step...",
            Nav::Book => "Book this package",
            Nav::Quit => "Quit without booking",
        }
    }
}

/// Menu entries for a step, in display order
fn nav_choices(step: WizardStep) -> Vec<Nav> {
    let mut choices = Vec::new();
    if step.is_last() {
        choices.push(Nav::Book);
    } else {
        choices.push(Nav::Next);
        choices.push(Nav::Edit);
    }
    if !step.is_first() {
        choices.push(Nav::Back);
    }
    choices.push(Nav::Jump);
    choices.push(Nav::Quit);
    choices
}

fn page_for<R: RateSource>(step: WizardStep) -> Box<dyn Page<R>> {
    match step {
        WizardStep::Destination => Box::new(DestinationPage),
        WizardStep::Dates => Box::new(DatesPage),
        WizardStep::Accommodation => Box::new(LodgingPage),
        WizardStep::Transportation => Box::new(TransportPage),
        WizardStep::Activities => Box::new(ActivitiesPage),
        WizardStep::Review => Box::new(ReviewPage),
    }
}

fn prompt_nav(step: WizardStep) -> Result<Nav> {
    let choices = nav_choices(step);
    let labels: Vec<&str> = choices.iter().map(|c| c.label()).collect();
    let index = Select::new()
        .with_prompt(format!("Step {} of {}: {}", step.number(), WizardStep::ALL.len(), step.title()))
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(choices[index])
}

fn prompt_jump_target(current: WizardStep) -> Result<WizardStep> {
    let labels: Vec<String> = WizardStep::ALL
        .iter()
        .map(|s| format!("{}. {}", s.number(), s.title()))
        .collect();
    let index = Select::new()
        .with_prompt("Jump to")
        .items(&labels)
        .default(current as usize)
        .interact()?;
    Ok(WizardStep::ALL[index])
}

/// Drive the wizard until the package is booked or the user quits
pub async fn run_wizard<R: RateSource>(
    wizard: &mut PackageBuilderWizard<R>,
    catalog: &Catalog,
    orders: &dyn OrderService,
) -> Result<Outcome> {
    let mut show_page = true;

    loop {
        let step = wizard.step();
        if show_page {
            page_for::<R>(step).show(wizard, catalog)?;
        }
        show_page = false;

        match prompt_nav(step)? {
            Nav::Edit => show_page = true,
            Nav::Next => match wizard.next() {
                Ok(_) => show_page = true,
                Err(e) => eprintln!("  {}", e),
            },
            Nav::Back => match wizard.previous() {
                Ok(_) => show_page = true,
                Err(e) => eprintln!("  {}", e),
            },
            Nav::Jump => {
                let target = prompt_jump_target(step)?;
                match wizard.jump_to(target) {
                    Ok(_) => show_page = true,
                    Err(e) => eprintln!("  {}", e),
                }
            }
            Nav::Book => match wizard.save(orders).await {
                Ok(confirmation) => return Ok(Outcome::Booked(confirmation)),
                Err(e) => {
                    eprintln!("  Booking failed: {}", e);
                    eprintln!("  Your selections are kept. Choose \"Book\" again to retry.");
                }
            },
            Nav::Quit => return Ok(Outcome::Abandoned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_choices() {
        assert_eq!(
            nav_choices(WizardStep::Destination),
            vec![Nav::Next, Nav::Edit, Nav::Jump, Nav::Quit]
        );
        assert_eq!(
            nav_choices(WizardStep::Review),
            vec![Nav::Book, Nav::Back, Nav::Jump, Nav::Quit]
        );
        assert!(nav_choices(WizardStep::Dates).contains(&Nav::Back));
    }
}
