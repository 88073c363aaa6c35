//! File-backed store for pre-recorded sessions
//!
//! Layout under the configured cache directory:
//!
//! ```text
//! <cache_dir>/<year>/schedule.yaml
//! <cache_dir>/<year>/<event_slug>/<session_id>.yaml
//! ```
//!
//! `event_slug` is the event name lowercased with separators turned into `_`
//! (`monaco_grand_prix`); `session_id` is the short identifier (`FP1`, `Q`, `R`).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::{RecordingCache, SessionRecording};
use crate::config::StoreConfig;
use crate::schema::{
    CarData, CircuitInfo, DriverResult, EventRecord, EventSchedule, Lap, Laps, RaceControlMessage,
    TrackStatusEvent, WeatherSample,
};
use crate::store::{LoadedSession, SessionStore};
use crate::types::{LoadFlags, SessionRequest, SessionType};
use crate::{PaddockError, Result};

const SCHEDULE_FILE: &str = "schedule.yaml";

/// Store reading recordings from a cache directory
#[derive(Debug)]
pub struct RecordedStore {
    config: StoreConfig,
    cache: RecordingCache,
}

impl RecordedStore {
    pub fn new(config: StoreConfig) -> Self {
        let cache = RecordingCache::new(config.cache_enabled);
        info!(
            cache_dir = %config.cache_dir.display(),
            cache_enabled = config.cache_enabled,
            "Recorded session store created"
        );
        Self { config, cache }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Memo of parsed recordings
    pub fn cache(&self) -> &RecordingCache {
        &self.cache
    }

    pub fn schedule_path(&self, year: i32) -> PathBuf {
        self.config.cache_dir.join(year.to_string()).join(SCHEDULE_FILE)
    }

    pub fn recording_path(&self, year: i32, event_name: &str, session_type: SessionType) -> PathBuf {
        self.config
            .cache_dir
            .join(year.to_string())
            .join(event_slug(event_name))
            .join(format!("{}.yaml", session_type.identifier()))
    }

    /// Schedule for `year`, or `None` when the season was never recorded.
    async fn read_schedule(&self, year: i32) -> Result<Option<EventSchedule>> {
        let path = self.schedule_path(year);
        match read_optional(&path).await? {
            Some(text) => Ok(Some(parse_yaml(&path, &text)?)),
            None => Ok(None),
        }
    }

    async fn read_recording(&self, path: &Path) -> Result<SessionRecording> {
        debug!(path = %path.display(), "Reading session recording");
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PaddockError::file_error(path.to_path_buf(), e))?;
        parse_yaml(path, &text)
    }
}

#[async_trait::async_trait]
impl SessionStore for RecordedStore {
    type Session = RecordedSession;

    async fn resolve(&self, request: &SessionRequest) -> Result<RecordedSession> {
        let not_found = || PaddockError::SessionNotFound { request: request.clone() };

        let Some(schedule) = self.read_schedule(request.year).await? else {
            debug!(year = request.year, "No schedule recorded for season");
            return Err(not_found());
        };

        let Some(event) = schedule.find_event(&request.event_name) else {
            debug!(event = %request.event_name, year = request.year, "Event not on schedule");
            return Err(not_found());
        };

        if !event.sessions.is_empty() && !event.has_session(request.session_type) {
            debug!(%request, "Session type not held at this event");
            return Err(not_found());
        }

        let event_name = event.event_name.as_deref().unwrap_or(&request.event_name);
        let path = self.recording_path(request.year, event_name, request.session_type);
        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| PaddockError::file_error(path.clone(), e))?;
        if !exists {
            debug!(path = %path.display(), "No recording for session");
            return Err(not_found());
        }

        debug!(%request, path = %path.display(), "Resolved session recording");
        Ok(RecordedSession::resolved(request.clone(), Some(event.clone()), path))
    }

    async fn load(&self, session: &mut RecordedSession, flags: LoadFlags) -> Result<()> {
        let recording = match self.cache.get(&session.request).await {
            Some(recording) => recording,
            None => {
                let recording = Arc::new(self.read_recording(&session.path).await?);
                self.cache.insert(&session.request, Arc::clone(&recording)).await;
                recording
            }
        };

        info!(
            request = %session.request,
            drivers = recording.drivers.len(),
            laps = recording.laps.as_ref().map_or(0, Laps::len),
            "Session recording loaded"
        );
        session.attach(recording, flags);
        Ok(())
    }

    async fn event_schedule(&self, year: i32) -> Result<EventSchedule> {
        match self.read_schedule(year).await? {
            Some(schedule) => Ok(schedule),
            None => Err(PaddockError::file_error(
                self.schedule_path(year),
                std::io::Error::new(std::io::ErrorKind::NotFound, "schedule not recorded"),
            )),
        }
    }
}

/// Directory name for an event: lowercase, words joined by `_`.
pub fn event_slug(event_name: &str) -> String {
    event_name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

async fn read_optional(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PaddockError::file_error(path.to_path_buf(), e)),
    }
}

fn parse_yaml<T: DeserializeOwned>(path: &Path, text: &str) -> Result<T> {
    let parsed: anyhow::Result<T> = serde_yaml_ng::from_str(text)
        .with_context(|| format!("malformed YAML in {}", path.display()));
    parsed.map_err(|e| PaddockError::Parse {
        context: path.display().to_string(),
        details: format!("{e:#}"),
    })
}

/// A session resolved by [`RecordedStore`]
///
/// Until loaded every table accessor returns `None`; afterwards only the
/// streams selected by the load flags are exposed.
#[derive(Debug, Clone)]
pub struct RecordedSession {
    request: SessionRequest,
    event: Option<EventRecord>,
    path: PathBuf,
    recording: Option<Arc<SessionRecording>>,
    loaded: LoadFlags,
}

impl RecordedSession {
    fn resolved(request: SessionRequest, event: Option<EventRecord>, path: PathBuf) -> Self {
        Self { request, event, path, recording: None, loaded: LoadFlags::NONE }
    }

    /// A fully loaded session built directly from a recording.
    pub fn from_recording(request: SessionRequest, recording: SessionRecording) -> Self {
        Self {
            request,
            event: None,
            path: PathBuf::new(),
            recording: Some(Arc::new(recording)),
            loaded: LoadFlags::ALL,
        }
    }

    /// Recording file backing this session
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn loaded_flags(&self) -> LoadFlags {
        self.loaded
    }

    pub fn is_loaded(&self) -> bool {
        self.recording.is_some()
    }

    fn attach(&mut self, recording: Arc<SessionRecording>, flags: LoadFlags) {
        self.recording = Some(recording);
        self.loaded = flags;
    }

    fn recording(&self) -> Result<&SessionRecording> {
        self.recording.as_deref().ok_or_else(|| PaddockError::not_loaded("session"))
    }

    fn stream<T: ?Sized>(
        &self,
        enabled: bool,
        pick: impl FnOnce(&SessionRecording) -> Option<&T>,
    ) -> Option<&T> {
        if !enabled {
            return None;
        }
        self.recording.as_deref().and_then(pick)
    }
}

impl LoadedSession for RecordedSession {
    fn request(&self) -> &SessionRequest {
        &self.request
    }

    fn name(&self) -> &str {
        self.recording
            .as_deref()
            .and_then(|r| r.session_name.as_deref())
            .unwrap_or(self.request.session_type.label())
    }

    fn date(&self) -> Option<NaiveDateTime> {
        self.recording.as_deref().and_then(|r| r.date)
    }

    fn weekend_session_type(&self) -> Option<&str> {
        self.recording.as_deref().and_then(|r| r.weekend_session_type.as_deref())
    }

    fn event(&self) -> Option<&EventRecord> {
        self.event.as_ref().or_else(|| self.recording.as_deref().and_then(|r| r.event.as_ref()))
    }

    fn drivers(&self) -> &[String] {
        self.recording.as_deref().map(|r| r.drivers.as_slice()).unwrap_or_default()
    }

    fn results(&self) -> Option<&[DriverResult]> {
        self.recording.as_deref().and_then(|r| r.results.as_deref())
    }

    fn laps(&self) -> Option<&Laps> {
        self.stream(self.loaded.laps, |r| r.laps.as_ref())
    }

    fn weather_data(&self) -> Option<&[WeatherSample]> {
        self.stream(self.loaded.weather, |r| r.weather.as_deref())
    }

    fn track_status(&self) -> Option<&[TrackStatusEvent]> {
        self.stream(self.loaded.messages, |r| r.track_status.as_deref())
    }

    fn race_control_messages(&self) -> Option<&[RaceControlMessage]> {
        self.stream(self.loaded.messages, |r| r.race_control_messages.as_deref())
    }

    fn get_driver(&self, number: &str) -> Result<DriverResult> {
        self.recording()?
            .driver_record(number)
            .cloned()
            .ok_or_else(|| PaddockError::DriverNotFound { number: number.to_string() })
    }

    fn car_data(&self, lap: &Lap) -> Result<CarData> {
        let recording = self.recording()?;
        if !self.loaded.telemetry {
            return Err(PaddockError::not_loaded("telemetry"));
        }
        let unavailable = || PaddockError::TelemetryUnavailable {
            number: lap.driver_number.clone(),
            lap: lap.lap_number.unwrap_or_default(),
        };
        let lap_number = lap.lap_number.ok_or_else(unavailable)?;
        recording.car_data_for(&lap.driver_number, lap_number).cloned().ok_or_else(unavailable)
    }

    fn circuit_info(&self) -> Result<CircuitInfo> {
        self.recording()?.circuit_info.clone().ok_or_else(|| PaddockError::CircuitInfoUnavailable {
            reason: format!("no circuit geometry recorded for {}", self.request),
        })
    }
}
