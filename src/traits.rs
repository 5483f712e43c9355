//! Collaborator seams for the click pipeline.
//!
//! The routing backend and the map renderer are both external. The pipeline
//! only talks to them through these traits, so a host application can plug
//! in its own HTTP stack or vector source.

use crate::layer::Feature;
use crate::locate::{LocateRequest, LocateResponse};
use crate::valhalla::LocateError;

/// Answers "which road edges are near this location".
pub trait LocateProvider {
    fn locate(&self, request: &LocateRequest) -> Result<LocateResponse, LocateError>;
}

/// A mutable feature collection owned by the renderer.
///
/// `clear` and the two `add_*` methods are the only mutations the pipeline
/// performs.
pub trait FeatureLayer {
    fn clear(&mut self);

    fn add_feature(&mut self, feature: Feature);

    /// Inserts a whole batch at once; renderers should treat this as a single
    /// visible update.
    fn add_features(&mut self, features: Vec<Feature>);

    fn features(&self) -> &[Feature];

    fn len(&self) -> usize {
        self.features().len()
    }

    fn is_empty(&self) -> bool {
        self.features().is_empty()
    }
}
