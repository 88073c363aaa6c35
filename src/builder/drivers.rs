//! Driver roster extraction

use std::collections::HashSet;

use tracing::debug;

use super::report::{ExtractionReport, SkipReason, Stage};
use crate::bundle::DriverInfo;
use crate::colors::{NEUTRAL_COLOR, team_color};
use crate::schema::DriverResult;
use crate::store::LoadedSession;

/// Build the roster from the results table, or from per-driver lookups when
/// the session has no results.
pub fn extract_driver_info(
    session: &dyn LoadedSession,
    report: &mut ExtractionReport,
) -> Vec<DriverInfo> {
    let mut roster = Roster::default();

    match session.results() {
        Some(results) if !results.is_empty() => {
            debug!(rows = results.len(), "Building roster from results");
            for row in results {
                match from_result(row) {
                    Some(driver) => roster.push(driver, report),
                    None => report.skip(Stage::Roster, row.abbreviation.as_str(), SkipReason::MissingDriverNumber),
                }
            }
        }
        _ => {
            debug!(drivers = session.drivers().len(), "No results, building roster from driver lookups");
            for number in session.drivers() {
                match session.get_driver(number) {
                    Ok(record) => roster.push(from_lookup(number, &record), report),
                    Err(e) => report.skip_with(Stage::Roster, number.as_str(), SkipReason::DriverLookupFailed, &e),
                }
            }
        }
    }

    roster.drivers
}

/// Results rows carry every field; `None` when the row has no driver number.
fn from_result(row: &DriverResult) -> Option<DriverInfo> {
    let number = row.driver_number.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
    let full_name = if row.full_name.trim().is_empty() { row.joined_name() } else { row.full_name.clone() };
    let team_color = row
        .team_color
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| fallback_color(&row.team_name));

    Some(DriverInfo {
        number: number.to_string(),
        abbreviation: row.abbreviation.clone(),
        full_name,
        team: row.team_name.clone(),
        team_color,
    })
}

fn from_lookup(number: &str, record: &DriverResult) -> DriverInfo {
    DriverInfo {
        number: number.to_string(),
        abbreviation: record.abbreviation.clone(),
        full_name: record.joined_name(),
        team: record.team_name.clone(),
        team_color: fallback_color(&record.team_name),
    }
}

fn fallback_color(team: &str) -> String {
    team_color(team).unwrap_or(NEUTRAL_COLOR).to_string()
}

/// Roster under construction, unique by number and abbreviation.
#[derive(Default)]
struct Roster {
    drivers: Vec<DriverInfo>,
    numbers: HashSet<String>,
    abbreviations: HashSet<String>,
}

impl Roster {
    fn push(&mut self, driver: DriverInfo, report: &mut ExtractionReport) {
        if self.numbers.contains(&driver.number) {
            report.skip(Stage::Roster, driver.number, SkipReason::DuplicateNumber);
            return;
        }
        if self.abbreviations.contains(&driver.abbreviation) {
            report.skip(Stage::Roster, driver.abbreviation, SkipReason::DuplicateAbbreviation);
            return;
        }
        self.numbers.insert(driver.number.clone());
        self.abbreviations.insert(driver.abbreviation.clone());
        self.drivers.push(driver);
    }
}
