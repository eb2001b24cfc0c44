//! Core data models for Infogrid
//!
//! Wire-level types exchanged with the predictor service. Field names match
//! the service's JSON bodies exactly.

use serde::{Deserialize, Serialize};

/// Advisory coordinate range for `x` and `y`
pub const COORDINATE_RANGE: std::ops::RangeInclusive<f64> = -100.0..=100.0;

/// A labeled sample point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }

    pub fn in_range(&self) -> bool {
        COORDINATE_RANGE.contains(&self.x) && COORDINATE_RANGE.contains(&self.y)
    }
}

impl Default for Point {
    /// A blank entry row: origin with value 1.0
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            value: 1.0,
        }
    }
}

/// Body of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub points: Vec<Point>,
}

/// Interpolated grid returned by the predictor.
///
/// `predictions[row][col]` is the value at `(x_grid[col], y_grid[row])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub x_grid: Vec<f64>,
    pub y_grid: Vec<f64>,
    pub predictions: Vec<Vec<f64>>,
    /// Per-cell standard deviation, when the service reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<Vec<Vec<f64>>>,
}

impl PredictionResponse {
    /// Check grid shape and finiteness; returns a description of the first violation
    pub fn validate(&self) -> Result<(), String> {
        if let Some(v) = first_non_finite(&self.x_grid) {
            return Err(format!("x_grid contains non-finite value {v}"));
        }
        if let Some(v) = first_non_finite(&self.y_grid) {
            return Err(format!("y_grid contains non-finite value {v}"));
        }
        check_matrix("predictions", &self.predictions, self.y_grid.len(), self.x_grid.len())?;
        if let Some(uncertainty) = &self.uncertainty {
            check_matrix("uncertainty", uncertainty, self.y_grid.len(), self.x_grid.len())?;
        }
        Ok(())
    }

    /// `(rows, cols)` of the prediction grid
    pub fn shape(&self) -> (usize, usize) {
        (self.y_grid.len(), self.x_grid.len())
    }

    pub fn value_at(&self, row: usize, col: usize) -> Option<f64> {
        self.predictions.get(row)?.get(col).copied()
    }

    /// Smallest and largest predicted value, `None` for an empty grid
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.predictions
            .iter()
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

fn first_non_finite(values: &[f64]) -> Option<f64> {
    values.iter().copied().find(|v| !v.is_finite())
}

fn check_matrix(name: &str, matrix: &[Vec<f64>], rows: usize, cols: usize) -> Result<(), String> {
    if matrix.len() != rows {
        return Err(format!(
            "{name} has {} rows, expected {rows} (len of y_grid)",
            matrix.len()
        ));
    }
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != cols {
            return Err(format!(
                "{name} row {i} has {} columns, expected {cols} (len of x_grid)",
                row.len()
            ));
        }
        if let Some(v) = first_non_finite(row) {
            return Err(format!("{name} row {i} contains non-finite value {v}"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize) -> PredictionResponse {
        PredictionResponse {
            x_grid: (0..cols).map(|i| i as f64).collect(),
            y_grid: (0..rows).map(|i| i as f64).collect(),
            predictions: vec![vec![0.5; cols]; rows],
            uncertainty: None,
        }
    }

    #[test]
    fn test_default_point() {
        assert_eq!(Point::default(), Point::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_in_range() {
        assert!(Point::new(-100.0, 100.0, 7.0).in_range());
        assert!(!Point::new(100.5, 0.0, 7.0).in_range());
        assert!(!Point::new(0.0, f64::NAN, 7.0).in_range());
    }

    #[test]
    fn test_request_wire_format() {
        let req = PredictionRequest {
            points: vec![Point::new(1.0, -2.0, 3.5)],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"points":[{"x":1.0,"y":-2.0,"value":3.5}]}"#);
    }

    #[test]
    fn test_response_parses_without_uncertainty() {
        let json = r#"{"x_grid":[0,1],"y_grid":[0],"predictions":[[1.0,2.0]]}"#;
        let resp: PredictionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.shape(), (1, 2));
        assert!(resp.uncertainty.is_none());
        assert!(resp.validate().is_ok());
        assert_eq!(resp.value_at(0, 1), Some(2.0));
        assert_eq!(resp.value_range(), Some((1.0, 2.0)));
    }

    #[test]
    fn test_validate_shape_mismatch() {
        let mut resp = grid(3, 4);
        assert!(resp.validate().is_ok());

        resp.predictions.pop();
        let err = resp.validate().unwrap_err();
        assert!(err.contains("2 rows"), "{err}");

        let mut resp = grid(3, 4);
        resp.predictions[1].push(0.0);
        assert!(resp.validate().unwrap_err().contains("row 1"));
    }

    #[test]
    fn test_validate_uncertainty() {
        let mut resp = grid(2, 2);
        resp.uncertainty = Some(vec![vec![0.1; 2]; 2]);
        assert!(resp.validate().is_ok());

        resp.uncertainty = Some(vec![vec![0.1; 3]; 2]);
        assert!(resp.validate().unwrap_err().starts_with("uncertainty"));
    }

    #[test]
    fn test_validate_non_finite() {
        let mut resp = grid(2, 2);
        resp.predictions[0][1] = f64::INFINITY;
        assert!(resp.validate().is_err());

        let mut resp = grid(2, 2);
        resp.x_grid[0] = f64::NAN;
        assert!(resp.validate().unwrap_err().starts_with("x_grid"));
    }
}
