//! Session Data Builder
//!
//! Turns a store-loaded session into a [`SessionBundle`]. Only resolving and
//! loading can fail a request; every extraction step afterwards skips what it
//! cannot use and records the skip in the bundle's [`ExtractionReport`].

pub mod drivers;
pub mod event;
pub mod report;
pub mod telemetry;

use std::sync::Arc;

use tracing::{error, info};

pub use drivers::extract_driver_info;
pub use event::extract_event_info;
pub use report::{ExtractionReport, SkipReason, SkippedItem, Stage};
pub use telemetry::extract_telemetry;

use crate::Result;
use crate::bundle::{BundleParts, DriverIndex, SessionBundle};
use crate::schema::{EventSchedule, Laps};
use crate::store::{LoadedSession, SessionStore};
use crate::types::{LoadFlags, SessionRequest};

/// Loads sessions from a store and shapes them into bundles
#[derive(Debug)]
pub struct SessionDataBuilder<S> {
    store: S,
}

impl<S: SessionStore> SessionDataBuilder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve, load and normalize one session.
    ///
    /// Store failures are logged and returned unchanged.
    pub async fn load_session_data(&self, request: &SessionRequest) -> Result<SessionBundle> {
        info!(%request, "Loading session data");

        let session = match self.load_session(request).await {
            Ok(session) => session,
            Err(e) => {
                error!(%request, error = %e, "Failed to load session");
                return Err(e);
            }
        };

        Ok(build_bundle(Arc::new(session)))
    }

    /// Season calendar, for offering event choices.
    pub async fn event_schedule(&self, year: i32) -> Result<EventSchedule> {
        self.store.event_schedule(year).await.inspect_err(|e| {
            error!(year, error = %e, "Failed to read event schedule");
        })
    }

    async fn load_session(&self, request: &SessionRequest) -> Result<S::Session> {
        let mut session = self.store.resolve(request).await?;
        self.store.load(&mut session, LoadFlags::ALL).await?;
        Ok(session)
    }
}

/// Assemble a bundle from an already-loaded session.
///
/// Streams the session lacks become empty collections. Building twice from
/// the same session yields equal bundles.
pub fn build_bundle(session: Arc<dyn LoadedSession>) -> SessionBundle {
    let mut report = ExtractionReport::new();

    let driver_info = extract_driver_info(session.as_ref(), &mut report);
    let index = DriverIndex::new(&driver_info);
    let event_info = extract_event_info(session.as_ref(), &mut report);

    let mut telemetry = extract_telemetry(session.as_ref(), &mut report);
    telemetry.retain(|number, _| {
        let on_roster = index.contains_number(number);
        if !on_roster {
            report.skip(Stage::Telemetry, number.as_str(), SkipReason::NotInRoster);
        }
        on_roster
    });

    let timing: Laps = session.laps().cloned().unwrap_or_default();
    for abbreviation in timing.drivers() {
        if !index.contains_abbreviation(abbreviation) {
            report.skip(Stage::Timing, abbreviation, SkipReason::UnknownTimingDriver);
        }
    }

    let weather = session.weather_data().map(<[_]>::to_vec).unwrap_or_default();
    let track_status = session.track_status().map(<[_]>::to_vec).unwrap_or_default();
    let race_control = session.race_control_messages().map(<[_]>::to_vec).unwrap_or_default();

    info!(
        request = %session.request(),
        drivers = driver_info.len(),
        telemetry = telemetry.len(),
        laps = timing.len(),
        weather = weather.len(),
        skipped = report.len(),
        "Session bundle built"
    );

    SessionBundle::new(BundleParts {
        session,
        timing,
        telemetry,
        weather,
        track_status,
        race_control,
        driver_info,
        event_info,
        report,
    })
}
