use serde::{Deserialize, Serialize};

use crate::{config::PlacementConfig, flow::node::Position};

/// Visible window of the canvas: pan offset in screen pixels and zoom factor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Where a newly added node lands, given how many nodes are already on
    /// the canvas. Later nodes are staggered downwards so they do not stack.
    pub fn placement(
        &self,
        node_count: usize,
        placement: &PlacementConfig,
    ) -> Position {
        let zoom = if self.zoom > 0.0 { self.zoom } else { 1.0 };
        Position {
            x: -self.x / zoom + placement.offset_x,
            y: -self.y / zoom + placement.offset_y + node_count as f64 * placement.stagger_y,
        }
    }
}
