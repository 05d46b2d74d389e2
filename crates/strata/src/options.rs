//! Layout configuration.
//!
//! Every field has a default, so hosts can pass a partial JSON object:
//!
//! ```
//! let opts = strata::LayoutOptions::from_json_str(r#"{ "sortIterations": 8 }"#).unwrap();
//! assert_eq!(opts.sort_iterations, 8);
//! assert_eq!(opts.exact_ordering_max_width, 8);
//! ```

use crate::order::OrderOptions;
use crate::position::Spacing;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[default]
    LeftToRight,
    TopToBottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Positioner {
    /// Minimum-separation packing followed by weighted-median alignment passes.
    #[default]
    Aligned,
    /// Spreads every layer evenly over the canvas height; ignores neighbour alignment.
    Even,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub direction: Direction,
    pub layer_distance: f64,
    pub vertex_spacing: f64,
    pub mixed_spacing: f64,
    pub virtual_spacing: f64,
    pub component_gap: f64,
    pub compress: bool,
    pub compression_spacing: f64,
    pub sort_iterations: usize,
    pub exact_ordering_max_width: usize,
    pub sibling_bonus: f64,
    pub positioner: Positioner,
    pub alignment_passes: usize,
    /// Fit the result into the input canvas; when false, raw coordinates are returned.
    pub scale_to_canvas: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: Direction::LeftToRight,
            layer_distance: 120.0,
            vertex_spacing: 30.0,
            mixed_spacing: 20.0,
            virtual_spacing: 10.0,
            component_gap: 40.0,
            compress: true,
            compression_spacing: 20.0,
            sort_iterations: 24,
            exact_ordering_max_width: 8,
            sibling_bonus: 0.0,
            positioner: Positioner::Aligned,
            alignment_passes: 4,
            scale_to_canvas: true,
        }
    }
}

impl LayoutOptions {
    pub fn spacing(&self) -> Spacing {
        Spacing {
            vertex: self.vertex_spacing,
            mixed: self.mixed_spacing,
            virtual_: self.virtual_spacing,
        }
    }

    pub fn order_options(&self) -> OrderOptions {
        OrderOptions {
            iterations: self.sort_iterations,
            exact_max_width: self.exact_ordering_max_width,
            sibling_bonus: self.sibling_bonus,
        }
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
