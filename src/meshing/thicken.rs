use crate::error::{MeshingError, Result};
use crate::math::polygon::newell_normal;
use crate::math::{Plane, Point2, Point3, Vector3, Vector4, TOLERANCE};

use super::{Face, PolyhedronData};

/// Thickens an ordered polygon into a closed prism-like solid.
///
/// The polygon defines one face of the solid; the solid is obtained by
/// translating it along its own normal by `height` and connecting the
/// corresponding edges with quads. The derivation is a pure function of
/// its inputs: identical inputs yield bit-identical output.
pub struct ThickenPolygon {
    points: Vec<Point3>,
    clockwise: bool,
    height: f64,
    inside_out: bool,
}

impl ThickenPolygon {
    /// Creates a new `ThickenPolygon` operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, clockwise: bool, height: f64, inside_out: bool) -> Self {
        Self {
            points,
            clockwise,
            height,
            inside_out,
        }
    }

    /// Executes the derivation.
    ///
    /// Vertices are duplicated per face for flat shading; each face is
    /// fan-triangulated from its first vertex. With `height` ≈ 0 the solid
    /// degenerates to a flat double-sided polygon (two caps, no sides).
    /// `inside_out` reverses every triangle's winding, negates every
    /// normal and flips tangent handedness, leaving positions untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 3 points are given or the polygon is
    /// degenerate (no well-defined normal).
    pub fn execute(&self) -> Result<PolyhedronData> {
        if self.points.len() < 3 {
            return Err(MeshingError::TooFewPoints {
                min: 3,
                actual: self.points.len(),
            }
            .into());
        }

        // `clockwise` flips the base winding, and with it the extrusion
        // axis, before any face is built.
        let mut base: Vec<Point3> = self.points.clone();
        if self.clockwise {
            base.reverse();
        }

        let normal = newell_normal(&base)?;
        let cap_plane = Plane::from_normal(base[0], normal)?;
        let offset = normal * self.height;
        let top: Vec<Point3> = base.iter().map(|point| point + offset).collect();

        let mut mesh = PolyhedronData::default();

        // Top cap, facing +normal.
        let top_uvs: Vec<Point2> = top
            .iter()
            .map(|point| {
                let (u, v) = cap_plane.project_to_uv(point);
                Point2::new(u, v)
            })
            .collect();
        add_face(&mut mesh, &top, normal, &top_uvs, *cap_plane.u_dir(), 1.0);

        // Bottom cap, reversed so it faces -normal.
        let bottom: Vec<Point3> = base.iter().rev().copied().collect();
        let bottom_uvs: Vec<Point2> = bottom
            .iter()
            .map(|point| {
                let (u, v) = cap_plane.project_to_uv(point);
                Point2::new(u, v)
            })
            .collect();
        add_face(
            &mut mesh,
            &bottom,
            -normal,
            &bottom_uvs,
            *cap_plane.u_dir(),
            -1.0,
        );

        // One outward quad per edge. Zero height degenerates to the flat
        // double-sided polygon, so no side faces at all.
        if self.height > TOLERANCE {
            let n = base.len();
            for i in 0..n {
                let j = (i + 1) % n;
                let edge = base[j] - base[i];
                let edge_len = edge.norm();
                if edge_len < TOLERANCE {
                    continue;
                }
                let along = edge / edge_len;
                let outward = along.cross(&normal);
                let outward_len = outward.norm();
                if outward_len < TOLERANCE {
                    continue;
                }

                let quad = [base[i], base[j], top[j], top[i]];
                let uvs = [
                    Point2::new(0.0, 0.0),
                    Point2::new(edge_len, 0.0),
                    Point2::new(edge_len, self.height),
                    Point2::new(0.0, self.height),
                ];
                add_face(&mut mesh, &quad, outward / outward_len, &uvs, along, 1.0);
            }
        }

        if self.inside_out {
            flip_orientation(&mut mesh);
        }

        Ok(mesh)
    }
}

/// Appends one flat-shaded face: duplicated vertices, a face loop and a
/// triangle fan from the loop's first vertex.
#[allow(clippy::cast_possible_truncation)]
fn add_face(
    mesh: &mut PolyhedronData,
    positions: &[Point3],
    normal: Vector3,
    uvs: &[Point2],
    tangent: Vector3,
    handedness: f64,
) {
    let first = mesh.positions.len() as u32;
    let count = positions.len() as u32;

    mesh.positions.extend_from_slice(positions);
    mesh.uvs.extend_from_slice(uvs);
    for _ in 0..count {
        mesh.normals.push(normal);
        mesh.tangents
            .push(Vector4::new(tangent.x, tangent.y, tangent.z, handedness));
    }

    let loop_indices: Vec<u32> = (first..first + count).collect();
    for k in 1..count - 1 {
        mesh.indices.push(first);
        mesh.indices.push(first + k);
        mesh.indices.push(first + k + 1);
    }
    mesh.structure.faces.push(Face {
        indices: loop_indices,
    });
}

/// Swaps inside and outside of an already-built solid: reverses every
/// triangle's winding, negates every normal and flips tangent handedness.
fn flip_orientation(mesh: &mut PolyhedronData) {
    for triangle in mesh.indices.chunks_exact_mut(3) {
        triangle.swap(1, 2);
    }
    for normal in &mut mesh.normals {
        *normal = -*normal;
    }
    for tangent in &mut mesh.tangents {
        tangent.w = -tangent.w;
    }
}
