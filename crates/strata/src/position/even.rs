use super::check_layers;
use crate::error::Result;
use crate::graph::Graph;

/// Spreads every layer over `height`, using the pitch of the widest layer for all layers and
/// centering narrower ones.
pub fn position_even(g: &mut Graph, height: f64) -> Result<()> {
    check_layers(g)?;
    let widest = g.max_layer_width();
    if widest == 0 || height <= 0.0 {
        return Ok(());
    }
    let step = height / widest as f64;
    for l in 0..g.layers.len() {
        let layer = g.layers[l].clone();
        let offset = (height - layer.len() as f64 * step) / 2.0;
        for (i, v) in layer.into_iter().enumerate() {
            g.vertex_mut(v).position = offset + step * (i as f64 + 0.5);
        }
    }
    Ok(())
}
