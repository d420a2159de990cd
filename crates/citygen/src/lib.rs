//! Procedural generation for the city: block layout, landmarks, streetscape and facades.

pub mod category;
pub mod config;
pub mod facade;
pub mod landmarks;
pub mod layout;
pub mod palette;
pub mod roads;
pub mod scene;
pub mod streetscape;

pub use category::*;
pub use config::*;
pub use facade::*;
pub use landmarks::*;
pub use layout::*;
pub use palette::*;
pub use roads::*;
pub use scene::*;
pub use streetscape::*;
