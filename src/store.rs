//! Session Store traits
//!
//! The store owns session discovery, data retrieval and caching. The builder
//! only talks to it through these two traits, so a recorded store, a network
//! client or a test fake can sit behind the same seam.

use chrono::NaiveDateTime;

use crate::Result;
use crate::schema::{
    CarData, CircuitInfo, DriverResult, EventRecord, EventSchedule, Lap, Laps, RaceControlMessage,
    TrackStatusEvent, WeatherSample,
};
use crate::types::{LoadFlags, SessionRequest};

/// Trait for session data sources
///
/// Resolution and loading are the only fallible steps of a request that are
/// allowed to abort it. Both run once per request, in order.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Handle type produced by this store
    type Session: LoadedSession + 'static;

    /// Resolve the request to an unloaded session handle
    ///
    /// Returns:
    /// - `Ok(session)` - The event and session exist
    /// - `Err(PaddockError::SessionNotFound)` - Unknown year, event or session type
    /// - `Err(e)` - The store itself failed
    async fn resolve(&self, request: &SessionRequest) -> Result<Self::Session>;

    /// Populate the handle in place with the streams selected by `flags`
    async fn load(&self, session: &mut Self::Session, flags: LoadFlags) -> Result<()>;

    /// Season calendar, used to offer event choices
    async fn event_schedule(&self, year: i32) -> Result<EventSchedule>;
}

/// A session handle after [`SessionStore::load`]
///
/// Table accessors return `None` when the stream was not loaded or the store
/// has no such feed for this session. Lookup methods fail per item.
pub trait LoadedSession: Send + Sync + std::fmt::Debug {
    /// The request this session was resolved from
    fn request(&self) -> &SessionRequest;

    /// Session-type label (e.g. "Qualifying")
    fn name(&self) -> &str;

    /// Session start
    fn date(&self) -> Option<NaiveDateTime>;

    /// Label of the session within the weekend format (e.g. "Sprint Shootout")
    fn weekend_session_type(&self) -> Option<&str>;

    /// Event record for the weekend
    fn event(&self) -> Option<&EventRecord>;

    /// Raw driver numbers as the store lists them
    fn drivers(&self) -> &[String];

    /// Classification table
    fn results(&self) -> Option<&[DriverResult]>;

    /// Lap timing
    fn laps(&self) -> Option<&Laps>;

    /// Weather feed
    fn weather_data(&self) -> Option<&[WeatherSample]>;

    /// Track status feed
    fn track_status(&self) -> Option<&[TrackStatusEvent]>;

    /// Race control feed
    fn race_control_messages(&self) -> Option<&[RaceControlMessage]>;

    /// Per-driver info lookup
    fn get_driver(&self, number: &str) -> Result<DriverResult>;

    /// Car data samples recorded during `lap`
    fn car_data(&self, lap: &Lap) -> Result<CarData>;

    /// Circuit geometry
    fn circuit_info(&self) -> Result<CircuitInfo>;
}
