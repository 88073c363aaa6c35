//! Session Store implementations

pub mod cache;
pub mod recorded;
pub mod recording;

pub use cache::RecordingCache;
pub use recorded::{RecordedSession, RecordedStore, event_slug};
pub use recording::SessionRecording;
