//! Request-side types.
//!
//! - [`SessionType`] names the session on an event weekend
//! - [`SessionRequest`] is the `(year, event, session type)` triple a load is keyed on
//! - [`LoadFlags`] selects which streams a store populates

mod request;
mod session_type;

pub use request::{LoadFlags, SessionRequest};
pub use session_type::SessionType;
