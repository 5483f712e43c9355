//! `/locate` responses as Valhalla returns them with `road_segments: true`.

use locate_viewer::polyline::Coordinate;

pub const CLICK: Coordinate = Coordinate {
    lon: 8.5417,
    lat: 47.3769,
};

/// Decodes to (8.541694, 47.376887), (8.542102, 47.377401), (8.543011, 47.377925).
pub const SHAPE_A: &str = "m~sjyA{~ihOc_@oXw_@yw@";
/// Decodes to (8.5, 47.0), (8.5005, 47.0003).
pub const SHAPE_B: &str = "_{ssxA_qxeOwQg^";
/// Decodes to (8.544, 47.378), (8.5451, 47.3791).
pub const SHAPE_C: &str = "_dvjyA_onhOwcAwcA";

/// Three edges, each with shape, intersections and mid point.
pub const THREE_EDGES: &str = r#"[
  {
    "input_lat": 47.3769,
    "input_lon": 8.5417,
    "edges": [
      {
        "way_id": 4384501,
        "percent_along": 0.42,
        "correlated_lat": 47.377,
        "correlated_lon": 8.5418,
        "side_of_street": "right",
        "full_road_segment": {
          "shape": "m~sjyA{~ihOc_@oXw_@yw@",
          "intersections": {
            "start_node": {"node": {"lat": 47.376887, "lon": 8.541694}},
            "end_node": {"node": {"lat": 47.377925, "lon": 8.543011}}
          },
          "mid_point": {"lat": 47.377401, "lon": 8.542102}
        }
      },
      {
        "way_id": 4384502,
        "full_road_segment": {
          "shape": "_{ssxA_qxeOwQg^",
          "intersections": {
            "start_node": {"node": {"lat": 47.0, "lon": 8.5}},
            "end_node": {"node": {"lat": 47.0003, "lon": 8.5005}}
          },
          "mid_point": {"lat": 47.00015, "lon": 8.50025}
        }
      },
      {
        "way_id": 4384503,
        "full_road_segment": {
          "shape": "_dvjyA_onhOwcAwcA",
          "intersections": {
            "start_node": {"node": {"lat": 47.378, "lon": 8.544}},
            "end_node": {"node": {"lat": 47.3791, "lon": 8.5451}}
          },
          "mid_point": {"lat": 47.37855, "lon": 8.54455}
        }
      }
    ]
  }
]"#;

/// Two edges without mid points.
pub const TWO_EDGES_NO_MID: &str = r#"[
  {
    "edges": [
      {
        "full_road_segment": {
          "shape": "_{ssxA_qxeOwQg^",
          "intersections": {
            "start_node": {"node": {"lat": 47.0, "lon": 8.5}},
            "end_node": {"node": {"lat": 47.0003, "lon": 8.5005}}
          }
        }
      },
      {
        "full_road_segment": {
          "shape": "_dvjyA_onhOwcAwcA",
          "intersections": {
            "start_node": {"node": {"lat": 47.378, "lon": 8.544}},
            "end_node": {"node": {"lat": 47.3791, "lon": 8.5451}}
          }
        }
      }
    ]
  }
]"#;

/// One edge with only a shape.
pub const SHAPE_ONLY: &str = r#"[{"edges": [{"full_road_segment": {"shape": "_{ssxA_qxeOwQg^"}}]}]"#;

/// Edges carrying neither shape nor intersections.
pub const BARE_EDGES: &str = r#"[{"edges": [{"way_id": 1}, {"way_id": 2}]}]"#;

/// No road near the location.
pub const NO_EDGES: &str = "[{}]";

pub const EMPTY_EDGES: &str = r#"[{"edges": []}]"#;

/// Valhalla's error object; not a result array.
pub const ERROR_OBJECT: &str = r#"{"error_code": 171, "error": "No suitable edges near location", "status_code": 400, "status": "Bad Request"}"#;
