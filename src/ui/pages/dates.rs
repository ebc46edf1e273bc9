//! Dates Page - stay dates and party size

use super::{report, Page};
use crate::catalog::Catalog;
use crate::pricing::RateSource;
use crate::wizard::PackageBuilderWizard;
use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::Input;

pub struct DatesPage;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| format!("'{}' is not a date (expected YYYY-MM-DD)", input.trim()))
}

fn prompt_date(prompt: &str, current: Option<NaiveDate>) -> Result<NaiveDate> {
    let mut input = Input::<String>::new().with_prompt(prompt).validate_with(|s: &String| {
        parse_date(s).map(|_| ())
    });
    if let Some(date) = current {
        input = input.default(date.format(DATE_FORMAT).to_string());
    }

    let text = input.interact_text()?;
    parse_date(&text).map_err(anyhow::Error::msg)
}

impl<R: RateSource> Page<R> for DatesPage {
    fn show(&self, wizard: &mut PackageBuilderWizard<R>, _catalog: &Catalog) -> Result<()> {
        let range = wizard.selection().date_range.clone();

        let check_in = prompt_date("Check-in (YYYY-MM-DD)", range.check_in)?;
        let check_out = prompt_date("Check-out (YYYY-MM-DD)", range.check_out.or(Some(check_in)))?;
        report(wizard.set_dates(check_in, check_out));

        let travelers: u32 = Input::new()
            .with_prompt("Travelers")
            .default(range.traveler_count)
            .validate_with(|n: &u32| if *n >= 1 { Ok(()) } else { Err("at least one traveler") })
            .interact_text()?;
        report(wizard.set_traveler_count(travelers));

        Ok(())
    }
}
