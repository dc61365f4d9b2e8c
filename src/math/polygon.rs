use crate::error::{GeometryError, Result};

use super::{Point3, Vector3, TOLERANCE};

/// Computes the unit normal of a polygon using Newell's method.
///
/// The sign follows the winding of `points`: counter-clockwise when viewed
/// against the returned normal.
///
/// # Errors
///
/// Returns an error if the polygon is degenerate (collinear or coincident
/// points).
pub fn newell_normal(points: &[Point3]) -> Result<Vector3> {
    let n = points.len();
    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    let len = normal.norm();
    if len < TOLERANCE {
        return Err(
            GeometryError::Degenerate("polygon has no well-defined normal".into()).into(),
        );
    }
    Ok(normal / len)
}

/// Computes the centroid (arithmetic mean) of a set of points.
///
/// Returns the origin for an empty slice.
#[must_use]
pub fn centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::origin();
    }
    let mut sum = Vector3::new(0.0, 0.0, 0.0);
    for point in points {
        sum += point.coords;
    }
    #[allow(clippy::cast_precision_loss)]
    Point3::from(sum / points.len() as f64)
}
