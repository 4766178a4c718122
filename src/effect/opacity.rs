use crate::config::options::ParallaxOptions;

/// Opacity for a block displaced by `offset` pixels.
///
/// Fully opaque inside `opacity_offset`, fully transparent beyond
/// `max_offset`, linear in between. Depends only on `|offset|`.
pub fn calculate_opacity(offset: f64, opts: &ParallaxOptions) -> f64 {
    let abs = offset.abs();
    if abs > opts.max_offset {
        return 0.0;
    }

    let diff = abs - opts.opacity_offset;
    if diff <= 0.0 {
        return 1.0;
    }

    1.0 - diff / (opts.max_offset - opts.opacity_offset)
}

#[cfg(test)]
#[path = "../../tests/unit/effect/opacity.rs"]
mod tests;
