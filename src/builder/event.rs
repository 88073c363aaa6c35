//! Event metadata extraction

use super::report::{ExtractionReport, SkipReason, Stage};
use crate::bundle::{EventInfo, EventInfoKey};
use crate::store::LoadedSession;

/// Collect whatever event metadata the session offers; never fails.
pub fn extract_event_info(session: &dyn LoadedSession, report: &mut ExtractionReport) -> EventInfo {
    let mut info = EventInfo::default();

    if let Some(event) = session.event() {
        info.name = present(event.event_name.as_deref());
        info.country = present(event.country.as_deref());
        info.location = present(event.location.as_deref());
        info.official_name = present(event.official_event_name.as_deref());
        info.f1_api_support = event.f1_api_support;
    }

    let length_key = EventInfoKey::CircuitLength.as_str();
    match session.circuit_info() {
        Ok(circuit) => match circuit.max_corner_distance() {
            Some(length) => info.circuit_length = Some(length),
            None => report.skip(Stage::EventInfo, length_key, SkipReason::NoCorners),
        },
        Err(e) => report.skip_with(Stage::EventInfo, length_key, SkipReason::CircuitInfoUnavailable, &e),
    }

    info.date = session.date();
    info.session_type = present(Some(session.name()));
    info.weekend_session_type = present(session.weekend_session_type());

    info
}

/// Trimmed text, or `None` when blank.
fn present(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CircuitInfo, Corner, EventRecord};
    use crate::stores::{RecordedSession, SessionRecording};
    use crate::types::{SessionRequest, SessionType};
    use proptest::prelude::*;

    fn session(recording: SessionRecording) -> RecordedSession {
        RecordedSession::from_recording(
            SessionRequest::new(2023, "Monaco", SessionType::Qualifying),
            recording,
        )
    }

    fn corner(distance: f64) -> Corner {
        Corner { distance: Some(distance), ..Default::default() }
    }

    #[test]
    fn copies_event_record_and_circuit_length() {
        let recording = SessionRecording {
            session_name: Some("Qualifying".into()),
            event: Some(EventRecord {
                event_name: Some("Monaco Grand Prix".into()),
                country: Some("Monaco".into()),
                location: Some("Monte Carlo".into()),
                official_event_name: Some("FORMULA 1 GRAND PRIX DE MONACO 2023".into()),
                f1_api_support: Some(true),
                ..Default::default()
            }),
            circuit_info: Some(CircuitInfo {
                corners: vec![corner(120.0), corner(3201.5), corner(1500.0)],
                rotation: None,
            }),
            ..Default::default()
        };
        let mut report = ExtractionReport::new();
        let info = extract_event_info(&session(recording), &mut report);

        assert!(report.is_clean());
        assert_eq!(info.name.as_deref(), Some("Monaco Grand Prix"));
        assert_eq!(info.location.as_deref(), Some("Monte Carlo"));
        assert_eq!(info.f1_api_support, Some(true));
        assert_eq!(info.circuit_length, Some(3201.5));
        assert_eq!(info.session_type.as_deref(), Some("Qualifying"));
        assert!(info.weekend_session_type.is_none());
    }

    #[test]
    fn missing_circuit_info_is_reported_not_fatal() {
        let mut report = ExtractionReport::new();
        let info = extract_event_info(&session(SessionRecording::default()), &mut report);

        assert!(info.circuit_length.is_none());
        assert!(info.name.is_none());
        assert!(report.contains(Stage::EventInfo, "CircuitLength", SkipReason::CircuitInfoUnavailable));
        // the label falls back to the requested session type
        assert_eq!(info.session_type.as_deref(), Some("Qualifying"));
    }

    #[test]
    fn cornerless_circuit_is_reported() {
        let recording = SessionRecording {
            circuit_info: Some(CircuitInfo { corners: vec![corner(f64::NAN)], rotation: None }),
            ..Default::default()
        };
        let mut report = ExtractionReport::new();
        let info = extract_event_info(&session(recording), &mut report);

        assert!(info.circuit_length.is_none());
        assert!(report.contains(Stage::EventInfo, "CircuitLength", SkipReason::NoCorners));
    }

    proptest! {
        #[test]
        fn event_info_never_holds_blank_or_non_finite_values(
            name in proptest::option::of("[ a-zA-Z]{0,12}"),
            country in proptest::option::of("[ a-zA-Z]{0,12}"),
            weekend in proptest::option::of("[ a-zA-Z]{0,12}"),
            distances in proptest::collection::vec(
                prop_oneof![Just(f64::NAN), Just(f64::INFINITY), 0.0f64..8000.0],
                0..6,
            ),
        ) {
            let recording = SessionRecording {
                session_name: Some(" ".into()),
                weekend_session_type: weekend,
                event: Some(EventRecord { event_name: name, country, ..Default::default() }),
                circuit_info: Some(CircuitInfo {
                    corners: distances.into_iter().map(corner).collect(),
                    rotation: None,
                }),
                ..Default::default()
            };
            let mut report = ExtractionReport::new();
            let info = extract_event_info(&session(recording), &mut report);

            for (key, value) in info.entries() {
                match value {
                    crate::bundle::EventValue::Text(text) => {
                        prop_assert!(!text.trim().is_empty(), "{} is blank", key)
                    }
                    crate::bundle::EventValue::Meters(m) => prop_assert!(m.is_finite()),
                    _ => {}
                }
            }
            prop_assert!(info.session_type.is_none());
        }
    }
}
