use std::path::Path;
use std::slice;

use tracing::debug;

use crate::consts::REMOVAL_THRESHOLD;
use crate::encoding::MinutiaeEncoder;
use crate::error::Error;
use crate::math::manhattan_distance;
use crate::parsing::MinutiaeReader;
use crate::types::{ImageSize, Minutia, Point};

/// Ordered minutiae of one editing session.
///
/// Order is file order for loaded minutiae and insertion order for new ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Minutiae {
    items: Vec<Minutia>,
}

impl Minutiae {
    pub fn new() -> Self {
        Minutiae { items: Vec::new() }
    }

    /// Replaces the whole collection with the content of `path`.
    ///
    /// On error the current minutiae are kept.
    pub fn load(&mut self, reader: &MinutiaeReader, path: impl AsRef<Path>) -> Result<(), Error> {
        self.items = reader.read(path)?;
        Ok(())
    }

    pub fn save(
        &self,
        encoder: &MinutiaeEncoder,
        path: impl AsRef<Path>,
        image: Option<ImageSize>,
    ) -> Result<(), Error> {
        encoder.write(path, &self.items, image)
    }

    pub fn push(&mut self, minutia: Minutia) {
        self.items.push(minutia);
    }

    /// Removes the minutia closest to `query` (original image pixels) if one is
    /// closer than [`REMOVAL_THRESHOLD`].
    pub fn remove_nearest(&mut self, query: Point) -> Option<Minutia> {
        self.remove_nearest_within(query, REMOVAL_THRESHOLD)
    }

    /// Same as [`Minutiae::remove_nearest`] with a custom threshold. Distances are
    /// Manhattan distances; on ties the earlier minutia goes.
    pub fn remove_nearest_within(&mut self, query: Point, threshold: f64) -> Option<Minutia> {
        let mut candidates: Vec<(f64, usize)> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, m)| (manhattan_distance(m, query), i))
            .filter(|&(distance, _)| distance < threshold)
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        let &(distance, index) = candidates.first()?;
        let removed = self.items.remove(index);
        debug!(index, distance, ?removed, "removed minutia");
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Minutia> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Minutia] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Minutia> {
        self.items
    }
}

impl From<Vec<Minutia>> for Minutiae {
    fn from(items: Vec<Minutia>) -> Self {
        Minutiae { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MinutiaType;

    fn at(x: i32, y: i32) -> Minutia {
        Minutia::new(x, y, 0.0, MinutiaType::RidgeEnding, 0.0)
    }

    #[test]
    fn removes_closest() {
        let mut minutiae = Minutiae::from(vec![at(0, 0), at(5, 5)]);
        assert_eq!(minutiae.remove_nearest(Point::new(1.0, 1.0)), Some(at(0, 0)));
        assert_eq!(minutiae.as_slice(), &[at(5, 5)]);
    }

    #[test]
    fn nothing_within_threshold() {
        let mut minutiae = Minutiae::from(vec![at(0, 0), at(5, 5)]);
        assert_eq!(minutiae.remove_nearest(Point::new(100.0, 100.0)), None);
        assert_eq!(minutiae.len(), 2);
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut minutiae = Minutiae::from(vec![at(0, 0)]);
        assert_eq!(minutiae.remove_nearest(Point::new(5.0, 5.0)), None);
        assert_eq!(minutiae.remove_nearest(Point::new(5.0, 4.5)), Some(at(0, 0)));
        assert!(minutiae.is_empty());
    }

    #[test]
    fn ties_remove_first_in_order() {
        let first = Minutia::new(2, 0, 10.0, MinutiaType::Bifurcation, 1.0);
        let second = Minutia::new(0, 2, 20.0, MinutiaType::RidgeEnding, 2.0);
        let mut minutiae = Minutiae::from(vec![at(50, 50), first, second]);
        assert_eq!(minutiae.remove_nearest(Point::new(0.0, 0.0)), Some(first));
        assert_eq!(minutiae.remove_nearest(Point::new(0.0, 0.0)), Some(second));
        assert_eq!(minutiae.into_vec(), vec![at(50, 50)]);
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut minutiae = Minutiae::new();
        minutiae.push(at(3, 3));
        minutiae.push(at(1, 1));
        let xs: Vec<_> = minutiae.iter().map(|m| m.x).collect();
        assert_eq!(xs, vec![3, 1]);
    }
}
