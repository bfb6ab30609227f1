use crate::consts::{DRAG_ANGLE_OFFSET, PLACEHOLDER_QUALITY};
use crate::types::{Minutia, MinutiaType, Point};

#[inline]
pub(crate) fn rounded(x: f64) -> i32 {
    x.round() as i32
}

#[inline]
pub(crate) fn rad_to_deg(rad: f64) -> f64 {
    180.0 / std::f64::consts::PI * rad
}

/// Builds a minutia from a drag gesture on the display.
///
/// The position is taken from `start` mapped back to the original image by
/// `scale`; `end` only sets the direction. A drag straight up gives 0°.
pub fn minutia_from_drag(start: Point, end: Point, kind: MinutiaType, scale: f64) -> Minutia {
    let angle = rad_to_deg(f64::atan2(end.y - start.y, end.x - start.x)) + DRAG_ANGLE_OFFSET;
    let position = start.scaled(scale);

    Minutia {
        x: rounded(position.x),
        y: rounded(position.y),
        angle,
        kind,
        quality: PLACEHOLDER_QUALITY,
    }
}

#[inline]
pub fn manhattan_distance(minutia: &Minutia, point: Point) -> f64 {
    (minutia.x as f64 - point.x).abs() + (minutia.y as f64 - point.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(start: (f64, f64), end: (f64, f64), scale: f64) -> Minutia {
        minutia_from_drag(
            Point::new(start.0, start.1),
            Point::new(end.0, end.1),
            MinutiaType::RidgeEnding,
            scale,
        )
    }

    #[test]
    fn straight_up_is_zero() {
        // atan2(-10, 0) = -90°, shifted by +90°.
        let m = drag((10.0, 10.0), (10.0, 0.0), 1.0);
        assert_eq!(m.angle, 0.0);
        assert_eq!((m.x, m.y), (10, 10));
    }

    #[test]
    fn other_directions() {
        assert_eq!(drag((10.0, 10.0), (20.0, 10.0), 1.0).angle, 90.0);
        assert_eq!(drag((10.0, 10.0), (10.0, 20.0), 1.0).angle, 180.0);
        assert_eq!(drag((10.0, 10.0), (0.0, 10.0), 1.0).angle, 270.0);
        assert_eq!(drag((10.0, 10.0), (20.0, 20.0), 1.0).angle, 135.0);
        assert_eq!(drag((10.0, 10.0), (0.0, 0.0), 1.0).angle, -45.0);
    }

    #[test]
    fn position_comes_from_scaled_start() {
        let m = drag((10.4, 20.8), (500.0, 500.0), 2.5);
        assert_eq!((m.x, m.y), (26, 52));
        assert_eq!(m.quality, PLACEHOLDER_QUALITY);
        assert_eq!(m.kind, MinutiaType::RidgeEnding);
    }

    #[test]
    fn zero_length_drag() {
        // atan2(0, 0) is 0.
        assert_eq!(drag((3.0, 3.0), (3.0, 3.0), 1.0).angle, 90.0);
    }

    #[test]
    fn manhattan() {
        let m = Minutia::new(5, 5, 0.0, MinutiaType::Bifurcation, 0.0);
        assert_eq!(manhattan_distance(&m, Point::new(1.0, 1.0)), 8.0);
        assert_eq!(manhattan_distance(&m, Point::new(7.5, 2.0)), 5.5);
    }
}
