//! Presentation defaults: palette, per-edge styles and the initial view.
//!
//! Styling is a pure function of [`EdgeId`]: the same edge id always maps to
//! the same palette entry, so a segment and its nodes share a color.

use serde::{Deserialize, Serialize};

use crate::layer::EdgeId;
use crate::polyline::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS `rgb(...)` notation.
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }

    /// CSS `rgba(...)` notation with the given alpha.
    pub fn css_alpha(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub color: Rgb,
    /// Line width in pixels for segments.
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            swatches: vec![
                Swatch { color: Rgb(0, 153, 51), width: 4.0 },
                Swatch { color: Rgb(0, 102, 204), width: 4.0 },
                Swatch { color: Rgb(230, 126, 34), width: 5.0 },
                Swatch { color: Rgb(142, 68, 173), width: 5.0 },
                Swatch { color: Rgb(22, 160, 133), width: 6.0 },
                Swatch { color: Rgb(192, 57, 43), width: 6.0 },
            ],
        }
    }
}

impl Palette {
    /// Returns `None` for an empty palette.
    pub fn new(swatches: Vec<Swatch>) -> Option<Self> {
        if swatches.is_empty() {
            None
        } else {
            Some(Self { swatches })
        }
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// Palette entry for `edge_id`, wrapping around the palette.
    pub fn swatch(&self, edge_id: EdgeId) -> Swatch {
        self.swatches
            .get(palette_index(edge_id, self.swatches.len()))
            .copied()
            .unwrap_or(DEFAULT_SWATCH)
    }

    /// Line style for the segment of `edge_id`.
    pub fn segment_style(&self, edge_id: EdgeId) -> StrokeStyle {
        let swatch = self.swatch(edge_id);
        StrokeStyle {
            color: swatch.color.css(),
            width: swatch.width,
        }
    }

    /// Circle style for the nodes of `edge_id`.
    pub fn node_style(&self, edge_id: EdgeId) -> CircleStyle {
        circle(self.swatch(edge_id).color)
    }
}

const DEFAULT_SWATCH: Swatch = Swatch {
    color: Rgb(0, 153, 51),
    width: 4.0,
};

const CLICK_COLOR: Rgb = Rgb(255, 0, 0);
const CIRCLE_RADIUS: f32 = 7.0;
const CIRCLE_STROKE_WIDTH: f32 = 2.0;

/// `edge_id mod len`; zero for an empty palette.
pub fn palette_index(edge_id: EdgeId, len: usize) -> usize {
    if len == 0 { 0 } else { edge_id.index() % len }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleStyle {
    pub radius: f32,
    pub fill_color: String,
    pub stroke_color: String,
    pub stroke_width: f32,
}

fn circle(color: Rgb) -> CircleStyle {
    CircleStyle {
        radius: CIRCLE_RADIUS,
        fill_color: color.css_alpha(0.5),
        stroke_color: color.css_alpha(1.0),
        stroke_width: CIRCLE_STROKE_WIDTH,
    }
}

/// Style of the clicked-location marker.
pub fn click_style() -> CircleStyle {
    circle(CLICK_COLOR)
}

/// Initial map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Coordinate::new(8.0, 47.0),
            zoom: 11.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_index_wraps() {
        assert_eq!(palette_index(EdgeId(0), 6), 0);
        assert_eq!(palette_index(EdgeId(5), 6), 5);
        assert_eq!(palette_index(EdgeId(6), 6), 0);
        assert_eq!(palette_index(EdgeId(13), 6), 1);
        assert_eq!(palette_index(EdgeId(4), 0), 0);
    }

    #[test]
    fn test_same_edge_same_color() {
        let palette = Palette::default();
        let id = EdgeId(7);
        assert_eq!(palette.segment_style(id).color, "rgb(0, 102, 204)");
        assert_eq!(palette.node_style(id).stroke_color, "rgba(0, 102, 204, 1)");
        assert_eq!(palette.swatch(id), palette.swatch(EdgeId(1)));
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(Palette::new(Vec::new()).is_none());
    }

    #[test]
    fn test_click_style() {
        let style = click_style();
        assert_eq!(style.fill_color, "rgba(255, 0, 0, 0.5)");
        assert_eq!(style.radius, 7.0);
        assert_eq!(style.stroke_width, 2.0);
    }

    #[test]
    fn test_default_view() {
        let view = MapView::default();
        assert_eq!(view.center, Coordinate::new(8.0, 47.0));
        assert_eq!(view.zoom, 11.0);
    }
}
