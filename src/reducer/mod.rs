//! Stream reducer: one session's messages → [`SessionSummary`].
//!
//! ```text
//! MessageSource --> normalize --> SessionReducer --> SessionSummary
//!                                      |                   |
//!                                   GpsRule             Segmenter
//!                               (bad samples)         (anomalies)
//! ```
//!
//! The reducer is stateless across sessions: every call gets its own
//! accumulator, and the same stream always reduces to the same summary.

mod gps;
mod runner;
mod summary;


pub use gps::{first_reading, GpsQuality, GpsRule};
pub use runner::{reduce_session, SessionReducer};
pub use summary::{Kpis, SessionSummary};
