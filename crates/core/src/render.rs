use super::graph::RegionGraph;
use common::scale::{DEFAULT_POWER, prop_to_size};
use common::types::{EdgeKey, ScoredRoute};

/// Vertex size range, in drawing units, that ship kills are mapped onto.
pub const SIZE_RANGE: (f64, f64) = (0.0, 5.0);

/// Range that jump counts are mapped onto for vertex colouring.
pub const COLOR_RANGE: (f64, f64) = (0.0, 1.0);

pub const ON_ROUTE_PEN_WIDTH: f64 = 6.0;
pub const OFF_ROUTE_PEN_WIDTH: f64 = 1.0;

/// Drawing hints handed to a renderer together with the graph.
///
/// `vertex_sizes` and `vertex_colors` are indexed like `graph.locations`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderHints {
    pub vertex_sizes: Vec<f64>,
    pub vertex_colors: Vec<f64>,
    pub edge_pen_widths: Vec<(EdgeKey, f64)>,
}

impl RenderHints {
    /// Rescales kills into sizes and jumps into colours, and gives a heavy
    /// pen to every edge whose two endpoints both lie on `best`.
    pub fn compute(graph: &RegionGraph, best: &ScoredRoute) -> Self {
        let kills: Vec<f64> = graph
            .locations
            .iter()
            .map(|l| f64::from(l.ship_kills))
            .collect();
        let jumps: Vec<f64> = graph.locations.iter().map(|l| f64::from(l.jumps)).collect();

        let edge_pen_widths = graph
            .edges
            .iter()
            .map(|&(a, b)| {
                let width = if best.contains(a) && best.contains(b) {
                    ON_ROUTE_PEN_WIDTH
                } else {
                    OFF_ROUTE_PEN_WIDTH
                };
                ((a, b), width)
            })
            .collect();

        RenderHints {
            vertex_sizes: prop_to_size(&kills, SIZE_RANGE.0, SIZE_RANGE.1, DEFAULT_POWER),
            vertex_colors: prop_to_size(&jumps, COLOR_RANGE.0, COLOR_RANGE.1, DEFAULT_POWER),
            edge_pen_widths,
        }
    }
}
