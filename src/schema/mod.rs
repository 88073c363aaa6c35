//! Record types for the tables a Session Store produces.
//!
//! Every type mirrors the store's column names through serde
//! (`PascalCase`, with the store's spellings such as `nGear` and `RPM` kept),
//! so recordings deserialize directly and consumers can address columns by the
//! names they already know. Columns are optional unless every session type
//! carries them.

pub mod event;
pub mod messages;
pub mod results;
pub mod telemetry;
pub mod timing;
pub mod weather;

pub use event::{CircuitInfo, Corner, EventRecord, EventSchedule};
pub use messages::{RaceControlMessage, TrackStatusEvent};
pub use results::DriverResult;
pub use telemetry::{CarData, CarSample, DRS_OPEN_THRESHOLD, derived_distance};
pub use timing::{Lap, Laps, pick_fastest};
pub use weather::WeatherSample;
