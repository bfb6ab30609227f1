/// Degrees per angle unit in NBIST/MINDTCT files (32 units per full circle).
pub const NBIST_DEGREES_PER_UNIT: f64 = 11.25;

/// Offset added to a drag direction so that 0° points up in image coordinates.
pub const DRAG_ANGLE_OFFSET: f64 = 90.0;

/// Manhattan distance (in original image pixels) under which a minutia can be
/// picked for removal.
pub const REMOVAL_THRESHOLD: f64 = 10.0;

/// Quality given to minutiae that were placed by hand.
pub const PLACEHOLDER_QUALITY: f64 = 0.0;

pub(crate) const NBIST_HEADER_LINES: usize = 4;
pub(crate) const NBIST_COUNT_LINE: usize = 2;
