//! Fastest-lap telemetry extraction

use std::collections::BTreeMap;

use tracing::debug;

use super::report::{ExtractionReport, SkipReason, Stage};
use crate::schema::{CarData, pick_fastest};
use crate::store::LoadedSession;

/// Car data of each driver's fastest lap, keyed by driver number.
///
/// Drivers are processed one at a time; a failure for one driver is recorded
/// and the rest continue.
pub fn extract_telemetry(
    session: &dyn LoadedSession,
    report: &mut ExtractionReport,
) -> BTreeMap<String, CarData> {
    let mut telemetry = BTreeMap::new();

    for number in session.drivers() {
        let driver_laps = session.laps().map(|laps| laps.pick_driver(number)).unwrap_or_default();
        if driver_laps.is_empty() {
            report.skip(Stage::Telemetry, number.as_str(), SkipReason::NoLaps);
            continue;
        }

        let Some(fastest) = pick_fastest(driver_laps.iter().copied()) else {
            report.skip(Stage::Telemetry, number.as_str(), SkipReason::NoTimedLap);
            continue;
        };

        let car_data = match session.car_data(fastest) {
            Ok(car_data) => car_data,
            Err(e) => {
                report.skip_with(Stage::Telemetry, number.as_str(), SkipReason::TelemetryFetchFailed, &e);
                continue;
            }
        };
        if car_data.is_empty() {
            report.skip(Stage::Telemetry, number.as_str(), SkipReason::EmptyCarData);
            continue;
        }

        debug!(
            driver = %number,
            lap = fastest.lap_number,
            samples = car_data.len(),
            "Extracted fastest-lap telemetry"
        );
        telemetry.insert(number.clone(), car_data.with_distance());
    }

    telemetry
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::schema::{CarSample, Lap, Laps, derived_distance};
    use crate::stores::{RecordedSession, SessionRecording};
    use crate::types::{SessionRequest, SessionType};

    fn lap(number: &str, lap_number: u32, lap_time: Option<f64>) -> Lap {
        Lap {
            driver: format!("D{number}"),
            driver_number: number.to_string(),
            lap_number: Some(lap_number),
            lap_time,
            ..Default::default()
        }
    }

    fn samples(distance: bool) -> CarData {
        CarData::new(
            (0..4)
                .map(|i| CarSample {
                    time: i as f64 * 0.5,
                    speed: 100.0 + i as f64,
                    distance: distance.then_some(i as f64 * 10.0),
                    ..Default::default()
                })
                .collect(),
        )
    }

    fn session(
        drivers: &[&str],
        laps: Vec<Lap>,
        car_data: Vec<(&str, u32, CarData)>,
    ) -> RecordedSession {
        let mut by_driver: BTreeMap<String, BTreeMap<u32, CarData>> = BTreeMap::new();
        for (number, lap_number, data) in car_data {
            by_driver.entry(number.to_string()).or_default().insert(lap_number, data);
        }
        let recording = SessionRecording {
            drivers: drivers.iter().map(|d| d.to_string()).collect(),
            laps: Some(Laps::new(laps)),
            car_data: by_driver,
            ..Default::default()
        };
        RecordedSession::from_recording(
            SessionRequest::new(2023, "Monaco", SessionType::Qualifying),
            recording,
        )
    }

    #[test]
    fn uses_fastest_lap_with_earliest_tie() {
        let session = session(
            &["1"],
            vec![lap("1", 1, Some(75.0)), lap("1", 2, Some(72.5)), lap("1", 3, Some(72.5))],
            vec![("1", 2, samples(true)), ("1", 3, CarData::default())],
        );
        let mut report = ExtractionReport::new();
        let telemetry = extract_telemetry(&session, &mut report);

        assert!(report.is_clean());
        assert_eq!(telemetry["1"], samples(true));
    }

    #[test]
    fn derives_distance_only_when_missing() {
        let session = session(&["1"], vec![lap("1", 1, Some(70.0))], vec![("1", 1, samples(false))]);
        let mut report = ExtractionReport::new();
        let telemetry = extract_telemetry(&session, &mut report);

        for sample in telemetry["1"].iter() {
            assert_eq!(sample.distance, Some(derived_distance(sample.time, sample.speed)));
        }
    }

    #[test]
    fn each_failure_mode_is_skipped_and_reported() {
        let session = session(
            &["1", "2", "3", "4", "5"],
            vec![
                lap("1", 1, Some(70.0)),
                lap("3", 1, None),
                lap("3", 2, Some(f64::NAN)),
                lap("4", 1, Some(71.0)),
                lap("5", 1, Some(72.0)),
            ],
            vec![("1", 1, samples(true)), ("4", 1, CarData::default())],
        );
        let mut report = ExtractionReport::new();
        let telemetry = extract_telemetry(&session, &mut report);

        assert_eq!(telemetry.keys().collect::<Vec<_>>(), vec!["1"]);
        assert!(report.contains(Stage::Telemetry, "2", SkipReason::NoLaps));
        assert!(report.contains(Stage::Telemetry, "3", SkipReason::NoTimedLap));
        assert!(report.contains(Stage::Telemetry, "4", SkipReason::EmptyCarData));
        assert!(report.contains(Stage::Telemetry, "5", SkipReason::TelemetryFetchFailed));
    }
}
