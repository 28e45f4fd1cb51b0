//! Uniform down-scaling of the source image onto the drawing surface.

/// Returns the single scale factor that fits an image of `natural_width` x `natural_height`
/// inside the optional maximum dimensions. Never upscales: the result is at most 1.
///
/// An unset constraint, or one not smaller than the natural extent, leaves that axis at 1.
pub fn compute_scale(
    natural_width: f64,
    natural_height: f64,
    max_width: Option<f64>,
    max_height: Option<f64>,
) -> f64 {
    let scale_x = axis_scale(natural_width, max_width);
    let scale_y = axis_scale(natural_height, max_height);
    scale_x.min(scale_y)
}

fn axis_scale(natural: f64, max: Option<f64>) -> f64 {
    match max {
        Some(max) if max < natural => max / natural,
        _ => 1.0,
    }
}
