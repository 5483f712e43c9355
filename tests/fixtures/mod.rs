//! Test fixtures for locate-viewer.
//!
//! Canned Valhalla `/locate` bodies around Zürich Hauptbahnhof. Shapes are
//! encoded at precision 6.

pub mod zurich_responses;

pub use zurich_responses::*;
