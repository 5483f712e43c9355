//! Renderable features and an in-memory vector layer.

use std::fmt;

use geojson::{FeatureCollection, Geometry as GeoJsonGeometry, JsonObject, Value};
use serde::{Deserialize, Serialize};

use crate::polyline::{Coordinate, Polyline};
use crate::traits::FeatureLayer;

/// Positional identity of an edge within one locate response.
///
/// Used only as a styling key; it is never derived from Valhalla ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Position of the edge in the response.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    pub edge_id: Option<EdgeId>,
}

impl Feature {
    /// An untagged point feature.
    pub fn point(coord: Coordinate) -> Self {
        Self {
            geometry: Geometry::Point(coord),
            edge_id: None,
        }
    }

    /// An untagged line feature following the polyline's points.
    pub fn line(polyline: Polyline) -> Self {
        Self {
            geometry: Geometry::LineString(polyline.into_points()),
            edge_id: None,
        }
    }

    /// Tags the feature with the edge it was derived from.
    pub fn with_edge_id(mut self, edge_id: EdgeId) -> Self {
        self.edge_id = Some(edge_id);
        self
    }

    /// Converts to a GeoJSON feature with `[lon, lat]` positions and an
    /// `edge_id` property when tagged.
    pub fn to_geojson(&self) -> geojson::Feature {
        let value = match &self.geometry {
            Geometry::Point(coord) => Value::Point(vec![coord.lon, coord.lat]),
            Geometry::LineString(coords) => Value::LineString(
                coords
                    .iter()
                    .map(|coord| vec![coord.lon, coord.lat])
                    .collect(),
            ),
        };

        let properties = self.edge_id.map(|edge_id| {
            let mut properties = JsonObject::new();
            properties.insert("edge_id".to_string(), edge_id.0.into());
            properties
        });

        geojson::Feature {
            bbox: None,
            geometry: Some(GeoJsonGeometry::new(value)),
            id: None,
            properties,
            foreign_members: None,
        }
    }
}

/// In-memory feature collection.
///
/// Counts committed batches so callers can see how many visible updates a
/// click produced.
#[derive(Debug, Clone, Default)]
pub struct VectorLayer {
    features: Vec<Feature>,
    batches: usize,
}

impl VectorLayer {
    /// Creates an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of insert calls (single or bulk) since creation.
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Exports every feature as a GeoJSON feature collection.
    pub fn to_geojson(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.features.iter().map(Feature::to_geojson).collect(),
            foreign_members: None,
        }
    }
}

impl FeatureLayer for VectorLayer {
    fn clear(&mut self) {
        self.features.clear();
    }

    fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
        self.batches += 1;
    }

    fn add_features(&mut self, features: Vec<Feature>) {
        self.features.extend(features);
        self.batches += 1;
    }

    fn features(&self) -> &[Feature] {
        &self.features
    }
}
