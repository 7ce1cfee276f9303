//! Time sources
//!
//! Everything that reads the current time (cache TTLs, stats windows) goes
//! through [`Clock`] so tests can pin and advance time deterministically.

pub mod clock;

pub use clock::{Clock, MockClock, SystemClock};
