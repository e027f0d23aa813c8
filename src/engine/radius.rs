const FULL_SIZE_MIN_DIM: f32 = 1000.0;
const COMPACT_MIN_DIM: f32 = 600.0;
const BASE_RADIUS: f32 = 20.0;
const RADIUS_VARIATION: f32 = 25.0;
const CHANGE_FOR_FULL_VARIATION: f64 = 20.0;
const MAX_VARIATION_SCALE: f64 = 1.5;

/// Shrinks bubbles on small viewports: 0.5 at zero, 0.75 at 600px, 1.0 from 1000px up.
pub fn size_multiplier(width: f32, height: f32) -> f32 {
    let min_dim = width.min(height).max(0.0);
    if min_dim >= FULL_SIZE_MIN_DIM {
        1.0
    } else if min_dim >= COMPACT_MIN_DIM {
        0.75 + ((min_dim - COMPACT_MIN_DIM) / (FULL_SIZE_MIN_DIM - COMPACT_MIN_DIM)) * 0.25
    } else {
        0.5 + (min_dim / COMPACT_MIN_DIM) * 0.25
    }
}

pub fn bubble_radius(percent_change: f64, width: f32, height: f32) -> f32 {
    let multiplier = size_multiplier(width, height);
    let base = BASE_RADIUS * multiplier;
    let variation = RADIUS_VARIATION * multiplier;
    let scale = (percent_change.abs() / CHANGE_FOR_FULL_VARIATION).min(MAX_VARIATION_SCALE) as f32;
    base + variation * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn multiplier_interpolates_between_breakpoints() {
        assert_close(size_multiplier(0.0, 0.0), 0.5);
        assert_close(size_multiplier(300.0, 900.0), 0.625);
        assert_close(size_multiplier(600.0, 600.0), 0.75);
        assert_close(size_multiplier(800.0, 1200.0), 0.875);
        assert_close(size_multiplier(1000.0, 1000.0), 1.0);
        assert_close(size_multiplier(2560.0, 1440.0), 1.0);
    }

    #[test]
    fn negative_dimensions_clamp_to_smallest_multiplier() {
        assert_close(size_multiplier(-50.0, 400.0), 0.5);
        assert!(bubble_radius(0.0, -50.0, -50.0) > 0.0);
    }

    #[test]
    fn flat_instrument_gets_base_radius() {
        assert_close(bubble_radius(0.0, 1000.0, 1000.0), 20.0);
        assert_close(bubble_radius(0.0, 600.0, 800.0), 15.0);
    }

    #[test]
    fn large_moves_are_capped() {
        assert_close(bubble_radius(30.0, 1000.0, 1000.0), 57.5);
        assert_close(bubble_radius(-30.0, 1000.0, 1000.0), 57.5);
        assert_close(bubble_radius(95.0, 1000.0, 1000.0), 57.5);
        assert_close(bubble_radius(-45.0, 300.0, 300.0), 0.625 * 20.0 + 0.625 * 25.0 * 1.5);
    }

    #[test]
    fn radius_grows_with_magnitude_of_change() {
        assert_close(bubble_radius(5.0, 1000.0, 1000.0), 26.25);
        assert_close(bubble_radius(-10.0, 1000.0, 1000.0), 32.5);
        assert!(bubble_radius(12.0, 800.0, 800.0) > bubble_radius(4.0, 800.0, 800.0));
    }
}
