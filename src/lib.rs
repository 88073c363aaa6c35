//! Typed session bundles for pre-recorded motorsport timing and telemetry.
//!
//! Paddock is the data-shaping core of a session dashboard. A caller picks a
//! `(year, event, session type)`; a [`SessionStore`] resolves and loads the
//! recorded session; the [`SessionDataBuilder`] normalizes it into one
//! [`SessionBundle`] holding timing, fastest-lap telemetry per driver,
//! weather, track status, race control, the driver roster and event metadata.
//!
//! # Features
//!
//! - **One fallible step**: only the store can fail a request; everything the
//!   builder skips afterwards is listed in the bundle's [`ExtractionReport`]
//! - **Consistent roster**: telemetry is keyed by driver number and never
//!   outlives the roster; the bundle owns the number ↔ abbreviation index
//! - **Recorded store**: [`RecordedStore`] reads YAML recordings from a cache
//!   directory configured through [`StoreConfig`]
//! - **Chart data**: [`analysis`] prepares summaries, speed deltas and stints
//!
//! ## Example
//!
//! ```rust,no_run
//! use paddock::{RecordedStore, SessionDataBuilder, SessionRequest, SessionType, StoreConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = RecordedStore::new(StoreConfig::load(None)?);
//!     let builder = SessionDataBuilder::new(store);
//!
//!     let request = SessionRequest::new(2023, "Monaco", SessionType::Qualifying);
//!     let bundle = builder.load_session_data(&request).await?;
//!
//!     for driver in bundle.driver_info() {
//!         let samples = bundle.telemetry_for(&driver.number).map_or(0, |t| t.len());
//!         println!("{} {} ({} samples)", driver.abbreviation, driver.team, samples);
//!     }
//!     if !bundle.report().is_clean() {
//!         println!("{} items skipped", bundle.report().len());
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod colors;
pub mod config;
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Store seam and implementations
pub mod schema;
pub mod store;
pub mod stores;

// Bundle construction and consumers
pub mod analysis;
pub mod builder;
pub mod bundle;
pub mod state;

// Core exports
pub use error::*;
pub use types::*;

pub use builder::{ExtractionReport, SessionDataBuilder, SkipReason, SkippedItem, Stage, build_bundle};
pub use bundle::{DriverIndex, DriverInfo, EventInfo, EventInfoKey, EventValue, SessionBundle};
pub use config::StoreConfig;
pub use state::SessionState;
pub use store::{LoadedSession, SessionStore};
pub use stores::{RecordedSession, RecordedStore, SessionRecording};
