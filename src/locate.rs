//! Wire contract for the Valhalla `/locate` service.
//!
//! Requests carry a single clicked location plus fixed query options.
//! Responses are a JSON array with one [`LocateResult`] per location; only
//! the first is ever consumed.

use serde::{Deserialize, Serialize};

use crate::polyline::Coordinate;

/// A `{lat, lon}` pair as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coordinate> for LatLon {
    fn from(coord: Coordinate) -> Self {
        Self {
            lat: coord.lat,
            lon: coord.lon,
        }
    }
}

impl From<LatLon> for Coordinate {
    fn from(location: LatLon) -> Self {
        Coordinate::new(location.lon, location.lat)
    }
}

/// Fixed query options sent with every click.
#[derive(Debug, Clone, PartialEq)]
pub struct LocateOptions {
    /// Costing profile, e.g. "auto", "bicycle", "pedestrian".
    pub costing: String,
    pub verbose: bool,
    /// Ask for the full road segment (shape and intersections) of each edge.
    pub road_segments: bool,
    /// Search radius in meters around the location.
    pub radius: Option<f64>,
    /// Distance in meters within which a location snaps to a node.
    pub node_snap_tolerance: Option<f64>,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            costing: "auto".to_string(),
            verbose: true,
            road_segments: true,
            radius: None,
            node_snap_tolerance: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocateRequest {
    pub locations: Vec<LatLon>,
    pub costing: String,
    pub verbose: bool,
    pub road_segments: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_snap_tolerance: Option<f64>,
}

impl LocateRequest {
    /// Builds a single-location request for a clicked coordinate.
    pub fn for_click(click: Coordinate, options: &LocateOptions) -> Self {
        Self {
            locations: vec![click.into()],
            costing: options.costing.clone(),
            verbose: options.verbose,
            road_segments: options.road_segments,
            radius: options.radius,
            node_snap_tolerance: options.node_snap_tolerance,
        }
    }
}

pub type LocateResponse = Vec<LocateResult>;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LocateResult {
    #[serde(default)]
    pub edges: Option<Vec<Edge>>,
    #[serde(default)]
    pub input_lat: Option<f64>,
    #[serde(default)]
    pub input_lon: Option<f64>,
}

impl LocateResult {
    /// Edges of this result; absent and empty lists look the same.
    pub fn edges(&self) -> &[Edge] {
        self.edges.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct IntersectionNode {
    pub node: LatLon,
}

/// Nodes bounding a road segment; either may be missing on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Intersections {
    #[serde(default)]
    pub start_node: Option<IntersectionNode>,
    #[serde(default)]
    pub end_node: Option<IntersectionNode>,
}

/// A located road edge.
///
/// `shape`, `intersections` and `mid_point` are independently optional.
/// Valhalla nests them under `full_road_segment`; a flat layout is accepted
/// as well and the nested values win when both are present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawEdge")]
pub struct Edge {
    pub shape: Option<String>,
    pub intersections: Option<Intersections>,
    pub mid_point: Option<LatLon>,
    pub way_id: Option<u64>,
    pub percent_along: Option<f64>,
    pub distance: Option<f64>,
    pub side_of_street: Option<String>,
    pub correlated: Option<LatLon>,
}

#[derive(Deserialize)]
struct RawRoadSegment {
    #[serde(default)]
    shape: Option<String>,
    #[serde(default)]
    intersections: Option<Intersections>,
    #[serde(default)]
    mid_point: Option<LatLon>,
}

#[derive(Deserialize)]
struct RawEdge {
    #[serde(default)]
    full_road_segment: Option<RawRoadSegment>,
    #[serde(default)]
    shape: Option<String>,
    #[serde(default)]
    intersections: Option<Intersections>,
    #[serde(default)]
    mid_point: Option<LatLon>,
    #[serde(default)]
    way_id: Option<u64>,
    #[serde(default)]
    percent_along: Option<f64>,
    #[serde(default)]
    distance: Option<f64>,
    #[serde(default)]
    side_of_street: Option<String>,
    #[serde(default)]
    correlated_lat: Option<f64>,
    #[serde(default)]
    correlated_lon: Option<f64>,
}

impl From<RawEdge> for Edge {
    fn from(raw: RawEdge) -> Self {
        let (shape, intersections, mid_point) = match raw.full_road_segment {
            Some(segment) => (
                segment.shape.or(raw.shape),
                segment.intersections.or(raw.intersections),
                segment.mid_point.or(raw.mid_point),
            ),
            None => (raw.shape, raw.intersections, raw.mid_point),
        };

        let correlated = match (raw.correlated_lat, raw.correlated_lon) {
            (Some(lat), Some(lon)) => Some(LatLon { lat, lon }),
            _ => None,
        };

        Self {
            shape,
            intersections,
            mid_point,
            way_id: raw.way_id,
            percent_along: raw.percent_along,
            distance: raw.distance,
            side_of_street: raw.side_of_street,
            correlated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let click = Coordinate::new(8.54, 47.37);
        let request = LocateRequest::for_click(click, &LocateOptions::default());
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "locations": [{"lat": 47.37, "lon": 8.54}],
                "costing": "auto",
                "verbose": true,
                "road_segments": true,
            })
        );
    }

    #[test]
    fn test_request_includes_tuning_when_set() {
        let options = LocateOptions {
            radius: Some(25.0),
            node_snap_tolerance: Some(5.0),
            ..LocateOptions::default()
        };
        let request = LocateRequest::for_click(Coordinate::new(8.0, 47.0), &options);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["radius"], 25.0);
        assert_eq!(body["node_snap_tolerance"], 5.0);
    }

    #[test]
    fn test_nested_road_segment() {
        let json = r#"{
            "way_id": 42,
            "correlated_lat": 47.1,
            "correlated_lon": 8.1,
            "full_road_segment": {
                "shape": "_{ssxA_qxeOwQg^",
                "intersections": {
                    "start_node": {"node": {"lat": 47.0, "lon": 8.5}},
                    "end_node": {"node": {"lat": 47.0003, "lon": 8.5005}}
                }
            }
        }"#;
        let edge: Edge = serde_json::from_str(json).unwrap();

        assert_eq!(edge.shape.as_deref(), Some("_{ssxA_qxeOwQg^"));
        let intersections = edge.intersections.unwrap();
        assert_eq!(intersections.end_node.unwrap().node.lon, 8.5005);
        assert_eq!(edge.mid_point, None);
        assert_eq!(edge.way_id, Some(42));
        assert_eq!(edge.correlated, Some(LatLon { lat: 47.1, lon: 8.1 }));
    }

    #[test]
    fn test_flat_edge_and_missing_fields() {
        let edge: Edge =
            serde_json::from_str(r#"{"shape": "??", "mid_point": {"lat": 1.0, "lon": 2.0}}"#)
                .unwrap();
        assert_eq!(edge.shape.as_deref(), Some("??"));
        assert_eq!(edge.intersections, None);
        assert_eq!(Coordinate::from(edge.mid_point.unwrap()), Coordinate::new(2.0, 1.0));

        let empty: Edge = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Edge::default());
    }

    #[test]
    fn test_intersections_with_one_node() {
        let json = r#"{
            "full_road_segment": {
                "intersections": {"start_node": {"node": {"lat": 47.0, "lon": 8.5}}}
            }
        }"#;
        let edge: Edge = serde_json::from_str(json).unwrap();

        let intersections = edge.intersections.unwrap();
        assert_eq!(
            intersections.start_node.map(|n| n.node),
            Some(LatLon { lat: 47.0, lon: 8.5 })
        );
        assert_eq!(intersections.end_node, None);
    }

    #[test]
    fn test_result_without_edges() {
        let response: LocateResponse = serde_json::from_str("[{}]").unwrap();
        assert_eq!(response.len(), 1);
        assert!(response[0].edges().is_empty());

        let response: LocateResponse = serde_json::from_str(r#"[{"edges": null}]"#).unwrap();
        assert!(response[0].edges().is_empty());
    }
}
