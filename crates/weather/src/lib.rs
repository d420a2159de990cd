//! Weather overlay for the city scene.
//!
//! Maps WMO weather codes to a coarse condition, picks the sky lighting and
//! the effects to show for it, and reads Open-Meteo responses into samples.
//! Fetching is left to the caller; this crate only builds the request URLs.

pub mod condition;
pub mod effects;
pub mod error;
pub mod lighting;
pub mod open_meteo;
pub mod query;

pub use condition::*;
pub use effects::*;
pub use error::*;
pub use lighting::*;
pub use open_meteo::*;
pub use query::*;
