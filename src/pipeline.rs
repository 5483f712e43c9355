//! Click handling: locate the nearest road edges and turn them into features.
//!
//! A click runs in two phases around the single call to the routing service:
//!
//! 1. [`ClickQueryPipeline::begin`] moves the clicked-location marker and
//!    builds the locate request, tagged with a fresh click generation.
//! 2. [`ClickQueryPipeline::finish`] takes the service answer and, if the
//!    click is still the latest one, rebuilds the node and segment layers.
//!
//! Hosts with an event loop can run the request in between on whatever
//! executor they have; [`ClickQueryPipeline::on_click`] does all of it inline.

use thiserror::Error;
use tracing::{debug, warn};

use crate::layer::{EdgeId, Feature, VectorLayer};
use crate::locate::{Edge, LocateOptions, LocateRequest, LocateResponse};
use crate::polyline::{Coordinate, DEFAULT_PRECISION, DecodeError, Polyline};
use crate::traits::{FeatureLayer, LocateProvider};
use crate::valhalla::LocateError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("locate failed: {0}")]
    Locate(#[from] LocateError),
}

/// A locate request that has been issued but not yet answered.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingQuery {
    generation: u64,
    click: Coordinate,
    request: LocateRequest,
}

impl PendingQuery {
    /// Click generation this query was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Clicked coordinate.
    pub fn click(&self) -> Coordinate {
        self.click
    }

    /// Request body to send to the locate service.
    pub fn request(&self) -> &LocateRequest {
        &self.request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub edges: usize,
    pub nodes: usize,
    pub segments: usize,
    /// Edges whose shape failed to decode and got no line feature.
    pub skipped_shapes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Rendered(RenderSummary),
    /// No road near the click; node and segment layers were cleared.
    NoEdges,
    /// A newer click was issued before this response arrived; nothing changed.
    Stale { generation: u64, latest: u64 },
}

pub struct ClickQueryPipeline<L: FeatureLayer = VectorLayer> {
    options: LocateOptions,
    precision: u32,
    clicked_location: L,
    nodes: L,
    segments: L,
    generation: u64,
}

impl<L: FeatureLayer + Default> ClickQueryPipeline<L> {
    /// Creates a pipeline with three empty layers.
    pub fn new(options: LocateOptions) -> Self {
        Self::with_layers(options, L::default(), L::default(), L::default())
    }
}

impl<L: FeatureLayer> ClickQueryPipeline<L> {
    /// Creates a pipeline drawing into the given layers.
    pub fn with_layers(
        options: LocateOptions,
        clicked_location: L,
        nodes: L,
        segments: L,
    ) -> Self {
        Self {
            options,
            precision: DEFAULT_PRECISION,
            clicked_location,
            nodes,
            segments,
            generation: 0,
        }
    }

    /// Overrides the shape precision exponent (default 6).
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Options sent with every locate request.
    pub fn options(&self) -> &LocateOptions {
        &self.options
    }

    /// Layer holding the clicked-location marker.
    pub fn clicked_location(&self) -> &L {
        &self.clicked_location
    }

    /// Layer holding node points of the located edges.
    pub fn nodes(&self) -> &L {
        &self.nodes
    }

    /// Layer holding the decoded edge lines.
    pub fn segments(&self) -> &L {
        &self.segments
    }

    /// Generation of the most recent click.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handles a click end to end, blocking on `provider`.
    pub fn on_click<P: LocateProvider>(
        &mut self,
        provider: &P,
        click: Coordinate,
    ) -> Result<ClickOutcome, PipelineError> {
        let pending = self.begin(click);
        let response = provider.locate(pending.request());
        self.finish(pending, response)
    }

    /// Shows the clicked location and prepares the locate request.
    pub fn begin(&mut self, click: Coordinate) -> PendingQuery {
        self.generation += 1;

        self.clicked_location.clear();
        self.clicked_location.add_feature(Feature::point(click));

        let request = LocateRequest::for_click(click, &self.options);
        debug!(
            generation = self.generation,
            lon = click.lon,
            lat = click.lat,
            "click: locate request prepared"
        );

        PendingQuery {
            generation: self.generation,
            click,
            request,
        }
    }

    /// Applies a locate answer for `pending`.
    ///
    /// Failures leave the node and segment layers as they were.
    pub fn finish(
        &mut self,
        pending: PendingQuery,
        response: Result<LocateResponse, LocateError>,
    ) -> Result<ClickOutcome, PipelineError> {
        if pending.generation != self.generation {
            debug!(
                generation = pending.generation,
                latest = self.generation,
                "click: discarding stale locate response"
            );
            return Ok(ClickOutcome::Stale {
                generation: pending.generation,
                latest: self.generation,
            });
        }

        let response = response.inspect_err(|err| {
            warn!(generation = pending.generation, error = %err, "click: locate request failed");
        })?;

        let Some(result) = response.first() else {
            warn!(generation = pending.generation, "click: locate response has no results");
            return Err(LocateError::Malformed("empty locate response".to_string()).into());
        };

        self.nodes.clear();
        self.segments.clear();

        let edges = result.edges();
        if edges.is_empty() {
            debug!(generation = pending.generation, "click: no edges near location");
            return Ok(ClickOutcome::NoEdges);
        }

        let mut node_batch = Vec::new();
        let mut segment_batch = Vec::new();
        let mut skipped_shapes = 0;

        for (index, edge) in edges.iter().enumerate() {
            let edge_id = EdgeId(index as u32);

            match self.segment_feature(edge, edge_id) {
                Some(Ok(feature)) => segment_batch.push(feature),
                Some(Err(err)) => {
                    warn!(%edge_id, error = %err, "click: skipping edge with undecodable shape");
                    skipped_shapes += 1;
                }
                None => {}
            }

            node_batch.extend(node_features(edge, edge_id));
        }

        let summary = RenderSummary {
            edges: edges.len(),
            nodes: node_batch.len(),
            segments: segment_batch.len(),
            skipped_shapes,
        };

        if !node_batch.is_empty() {
            self.nodes.add_features(node_batch);
        }
        if !segment_batch.is_empty() {
            self.segments.add_features(segment_batch);
        }

        debug!(
            generation = pending.generation,
            edges = summary.edges,
            nodes = summary.nodes,
            segments = summary.segments,
            "click: layers updated"
        );

        Ok(ClickOutcome::Rendered(summary))
    }

    fn segment_feature(
        &self,
        edge: &Edge,
        edge_id: EdgeId,
    ) -> Option<Result<Feature, DecodeError>> {
        let shape = edge.shape.as_deref()?;
        Some(
            Polyline::decode(shape, self.precision)
                .map(|polyline| Feature::line(polyline).with_edge_id(edge_id)),
        )
    }
}

/// Start node, optional mid point, end node; nothing without intersections.
///
/// Each node that is missing on the wire is simply left out.
fn node_features(edge: &Edge, edge_id: EdgeId) -> Vec<Feature> {
    let Some(intersections) = &edge.intersections else {
        return Vec::new();
    };

    let start = intersections.start_node.map(|start| start.node);
    let end = intersections.end_node.map(|end| end.node);

    [start, edge.mid_point, end]
        .into_iter()
        .flatten()
        .map(|point| Feature::point(point.into()).with_edge_id(edge_id))
        .collect()
}
