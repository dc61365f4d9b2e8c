use crate::error::{GeometryError, Result};

use super::{Plane, Point3, Vector3, TOLERANCE};

/// A half-infinite ray defined by an origin and a unit direction.
///
/// The parametric form is: `P(t) = origin + t * direction`, `t >= 0`.
#[derive(Debug, Clone)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
}

impl Ray {
    /// Creates a new ray from an origin and direction.
    ///
    /// The direction is normalized on construction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Returns the origin point of the ray.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit direction vector of the ray.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Computes the point along the ray at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Intersects the ray with a plane.
    ///
    /// Returns the hit point, or `None` when the ray is parallel to the
    /// plane or the intersection lies behind the origin.
    #[must_use]
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Point3> {
        let normal = plane.normal();
        let denom = normal.dot(&self.direction);
        if denom.abs() < TOLERANCE {
            return None;
        }
        let t = normal.dot(&(plane.origin() - &self.origin)) / denom;
        if t < 0.0 {
            return None;
        }
        Some(self.point_at(t))
    }

    /// Projects the ray onto the line `anchor + s * axis`.
    ///
    /// Returns the signed parameter `s` of the point on the line closest to
    /// the ray, or `None` when the ray and the line are parallel. `axis`
    /// must be unit-length.
    #[must_use]
    pub fn project_onto_line(&self, anchor: &Point3, axis: &Vector3) -> Option<f64> {
        // Closest approach of two lines: solve for s along `axis` with
        // d = ray direction, w = anchor - ray origin.
        let d = &self.direction;
        let b = axis.dot(d);
        let denom = 1.0 - b * b;
        if denom.abs() < TOLERANCE {
            return None;
        }
        let w = anchor - &self.origin;
        let e = axis.dot(&w);
        let f = d.dot(&w);
        Some((b * f - e) / denom)
    }
}
