use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoundaryBoxError {
    #[error("boundary box upper corner must exceed lower corner on axis {axis}: upper {upper} <= lower {lower}")]
    DegenerateAxis { axis: usize, upper: f64, lower: f64 },
}

/// An axis-aligned rectangular simulation box.
///
/// The box is immutable after construction and guarantees `upper[i] > lower[i]`
/// on every axis. It carries no boundary-condition semantics of its own; the
/// engine's boundary manager decides whether particles reflect at or wrap
/// across its faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryBox {
    upper: Point3<f64>,
    lower: Point3<f64>,
}

impl BoundaryBox {
    /// Creates a boundary box from its two corners.
    ///
    /// # Arguments
    ///
    /// * `lower` - The corner with the smallest coordinate on every axis.
    /// * `upper` - The corner with the largest coordinate on every axis.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryBoxError::DegenerateAxis`] if any axis has
    /// `upper <= lower`.
    pub fn new(lower: Point3<f64>, upper: Point3<f64>) -> Result<Self, BoundaryBoxError> {
        for axis in 0..3 {
            if upper[axis] <= lower[axis] {
                return Err(BoundaryBoxError::DegenerateAxis {
                    axis,
                    upper: upper[axis],
                    lower: lower[axis],
                });
            }
        }
        Ok(Self { upper, lower })
    }

    pub fn upper(&self) -> Point3<f64> {
        self.upper
    }

    pub fn lower(&self) -> Point3<f64> {
        self.lower
    }

    /// Edge length of the box along the given axis.
    pub fn extent(&self, axis: usize) -> f64 {
        self.upper[axis] - self.lower[axis]
    }

    /// Whether the point lies inside the box or on its surface.
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|axis| point[axis] >= self.lower[axis] && point[axis] <= self.upper[axis])
    }
}
