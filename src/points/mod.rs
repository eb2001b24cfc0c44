//! Ordered store of labeled sample points
//!
//! Points keep insertion order and may repeat. Coordinates outside the
//! advisory `[-100, 100]` range are accepted; the store hands back a
//! [`RangeWarning`] so the caller can surface it.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::{Point, COORDINATE_RANGE};

/// Coordinate of a point, used for per-cell edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    X,
    Y,
    Value,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::X => write!(f, "x"),
            Field::Y => write!(f, "y"),
            Field::Value => write!(f, "value"),
        }
    }
}

/// Advisory signal for a point accepted with out-of-range or non-finite data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeWarning {
    pub index: usize,
    pub point: Point,
    /// Offending fields, in x, y, value order
    pub fields: Vec<Field>,
}

impl std::fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<String> = self.fields.iter().map(|f| f.to_string()).collect();
        write!(
            f,
            "point {} ({}, {}) = {} is outside the expected range [{}, {}] on {}",
            self.index,
            self.point.x,
            self.point.y,
            self.point.value,
            COORDINATE_RANGE.start(),
            COORDINATE_RANGE.end(),
            fields.join(", ")
        )
    }
}

/// Immutable copy of the store's contents at one moment
#[derive(Debug, Clone, PartialEq)]
pub struct PointSnapshot(Arc<[Point]>);

impl PointSnapshot {
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::ops::Deref for PointSnapshot {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `point`. Never rejects; returns a warning when it is out of range.
    pub fn add(&mut self, point: Point) -> Option<RangeWarning> {
        self.points.push(point);
        let index = self.points.len() - 1;
        debug!(index, x = point.x, y = point.y, value = point.value, "point added");
        check_range(index, point)
    }

    /// Append a blank row (origin, value 1.0)
    pub fn add_default(&mut self) -> usize {
        self.points.push(Point::default());
        self.points.len() - 1
    }

    /// Remove the point at `index`, shifting later points down.
    /// Out-of-bounds indices leave the store untouched.
    pub fn remove(&mut self, index: usize) -> Option<Point> {
        if index >= self.points.len() {
            debug!(index, len = self.points.len(), "remove ignored, index out of bounds");
            return None;
        }
        Some(self.points.remove(index))
    }

    /// Overwrite one field of the point at `index`.
    ///
    /// Out-of-bounds indices are ignored (`None`); otherwise the outcome
    /// carries an optional range warning for the edited point.
    pub fn update(&mut self, index: usize, field: Field, value: f64) -> Option<Option<RangeWarning>> {
        let point = self.points.get_mut(index)?;
        match field {
            Field::X => point.x = value,
            Field::Y => point.y = value,
            Field::Value => point.value = value,
        }
        let point = *point;
        Some(check_range(index, point))
    }

    /// Replace the whole point at `index`; same semantics as [`update`](Self::update)
    pub fn set(&mut self, index: usize, point: Point) -> Option<Option<RangeWarning>> {
        let slot = self.points.get_mut(index)?;
        *slot = point;
        Some(check_range(index, point))
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Copy the current contents; later mutations do not reach the copy
    pub fn snapshot(&self) -> PointSnapshot {
        PointSnapshot(Arc::from(self.points.as_slice()))
    }
}

impl FromIterator<Point> for PointStore {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

fn check_range(index: usize, point: Point) -> Option<RangeWarning> {
    let mut fields = Vec::new();
    if !COORDINATE_RANGE.contains(&point.x) {
        fields.push(Field::X);
    }
    if !COORDINATE_RANGE.contains(&point.y) {
        fields.push(Field::Y);
    }
    if !point.value.is_finite() {
        fields.push(Field::Value);
    }
    if fields.is_empty() {
        return None;
    }

    let warning = RangeWarning {
        index,
        point,
        fields,
    };
    warn!("{}", warning);
    Some(warning)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(n: usize) -> PointStore {
        (0..n)
            .map(|i| Point::new(i as f64, -(i as f64), i as f64 * 10.0))
            .collect()
    }

    #[test]
    fn test_add_keeps_order_and_duplicates() {
        let mut store = PointStore::new();
        let p = Point::new(1.0, 2.0, 3.0);
        assert!(store.add(p).is_none());
        assert!(store.add(Point::new(5.0, 5.0, 0.0)).is_none());
        assert!(store.add(p).is_none());
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(0), Some(&p));
        assert_eq!(store.get(2), Some(&p));
    }

    #[test]
    fn test_add_out_of_range_is_accepted_with_warning() {
        let mut store = PointStore::new();
        let warning = store.add(Point::new(150.0, -100.0, 2.0)).unwrap();
        assert_eq!(warning.index, 0);
        assert_eq!(warning.fields, vec![Field::X]);
        assert_eq!(store.len(), 1);

        let warning = store.add(Point::new(-101.0, 101.0, f64::NAN)).unwrap();
        assert_eq!(warning.fields, vec![Field::X, Field::Y, Field::Value]);
        assert_eq!(store.len(), 2);
        assert!(warning.to_string().contains("x, y, value"));
    }

    #[test]
    fn test_remove_reindexes() {
        let mut store = store_of(4);
        let removed = store.remove(1).unwrap();
        assert_eq!(removed.x, 1.0);
        let xs: Vec<f64> = store.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 3.0]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut store = store_of(3);
        let before = store.snapshot();
        assert!(store.remove(3).is_none());
        assert!(store.remove(usize::MAX).is_none());
        assert_eq!(store.len(), 3);
        assert_eq!(store.snapshot(), before);

        let mut empty = PointStore::new();
        assert!(empty.remove(0).is_none());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let mut store = store_of(2);
        let snap = store.snapshot();

        store.add(Point::new(9.0, 9.0, 9.0));
        store.update(0, Field::Value, -1.0);
        store.remove(1);

        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].value, 0.0);
        assert_eq!(snap[1].x, 1.0);
    }

    #[test]
    fn test_update_field() {
        let mut store = PointStore::new();
        let index = store.add_default();
        assert_eq!(store.update(index, Field::Y, 4.5), Some(None));
        assert_eq!(store.get(index), Some(&Point::new(0.0, 4.5, 1.0)));

        let outcome = store.update(index, Field::X, 400.0).unwrap();
        assert_eq!(outcome.unwrap().fields, vec![Field::X]);

        assert_eq!(store.update(7, Field::X, 1.0), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_and_clear() {
        let mut store = store_of(2);
        assert_eq!(store.set(1, Point::new(3.0, 3.0, 3.0)), Some(None));
        assert_eq!(store.get(1), Some(&Point::new(3.0, 3.0, 3.0)));
        assert_eq!(store.set(5, Point::default()), None);

        store.clear();
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }
}
