//! locate-viewer core
//!
//! Turns map clicks into Valhalla `/locate` queries and the answers into
//! renderable road segments and nodes.

pub mod traits;
pub mod polyline;
pub mod locate;
pub mod valhalla;
pub mod layer;
pub mod style;
pub mod pipeline;
