use crate::scene::Frame;

use super::{PolyhedronData, StandardVertex, VertexFormat};

/// Re-expresses derived mesh data in the local frame of its owning object
/// and packs it into [`StandardVertex`] records.
///
/// Positions get the full inverse of the owner's transform; normals get
/// only the inverse rotation and are re-normalized afterwards to counter
/// scale-induced distortion.
pub struct ProjectToFrame<'a> {
    data: &'a PolyhedronData,
    frame: &'a Frame,
}

impl<'a> ProjectToFrame<'a> {
    /// Creates a new `ProjectToFrame` operation.
    #[must_use]
    pub fn new(data: &'a PolyhedronData, frame: &'a Frame) -> Self {
        Self { data, frame }
    }

    /// Executes the projection, returning the packed vertex bytes.
    ///
    /// Returns `None` when the frame's transform is not invertible (the
    /// owner cannot be resolved, so there is nothing to render).
    ///
    /// # Panics
    ///
    /// Panics if the declared vertex layout size and the packed record
    /// size disagree. That is a build-time contract violation between the
    /// deriver and this packer, never a user-data problem; it is logged
    /// with both sizes before aborting.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self, format: &VertexFormat) -> Option<Vec<u8>> {
        let declared = format.vertex_size();
        let packed = std::mem::size_of::<StandardVertex>();
        if declared != packed {
            tracing::error!(declared, packed, "vertex layout does not match packed record");
            panic!("vertex layout size mismatch: layout declares {declared} bytes, packed record is {packed} bytes");
        }

        let inverse = self.frame.to_matrix().try_inverse()?;
        let rotation_inverse = self.frame.rotation().inverse();

        let mut records = Vec::with_capacity(self.data.vertex_count());
        for i in 0..self.data.vertex_count() {
            let position = inverse.transform_point(&self.data.positions[i]);
            let normal = (rotation_inverse * self.data.normals[i]).normalize();
            let tangent = &self.data.tangents[i];
            let uv = &self.data.uvs[i];

            records.push(StandardVertex {
                position: [position.x as f32, position.y as f32, position.z as f32],
                normal: [normal.x as f32, normal.y as f32, normal.z as f32],
                tangent: [
                    tangent.x as f32,
                    tangent.y as f32,
                    tangent.z as f32,
                    tangent.w as f32,
                ],
                color: [1.0, 1.0, 1.0, 1.0],
                texcoord: [uv.x as f32, uv.y as f32],
            });
        }

        Some(bytemuck::cast_slice(&records).to_vec())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, UnitQuaternion, Vector3};
    use crate::meshing::ThickenPolygon;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn square_mesh() -> PolyhedronData {
        ThickenPolygon::new(
            vec![
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(1.0, 1.0, 0.0),
                p(0.0, 1.0, 0.0),
            ],
            false,
            1.0,
            false,
        )
        .execute()
        .unwrap()
    }

    fn unpack(bytes: &[u8]) -> &[StandardVertex] {
        bytemuck::cast_slice(bytes)
    }

    #[test]
    fn identity_frame_passes_positions_through() {
        let mesh = square_mesh();
        let frame = Frame::new();
        let bytes = ProjectToFrame::new(&mesh, &frame)
            .execute(&VertexFormat::standard())
            .unwrap();

        assert_eq!(bytes.len(), mesh.vertex_count() * 64);
        let vertices = unpack(&bytes);
        for (vertex, position) in vertices.iter().zip(&mesh.positions) {
            assert_relative_eq!(f64::from(vertex.position[0]), position.x, epsilon = 1e-6);
            assert_relative_eq!(f64::from(vertex.position[1]), position.y, epsilon = 1e-6);
            assert_relative_eq!(f64::from(vertex.position[2]), position.z, epsilon = 1e-6);
        }
    }

    #[test]
    fn translated_frame_offsets_positions() {
        let mesh = square_mesh();
        let frame = Frame::from_position(p(10.0, 0.0, 0.0));
        let bytes = ProjectToFrame::new(&mesh, &frame)
            .execute(&VertexFormat::standard())
            .unwrap();

        let vertices = unpack(&bytes);
        // Ambient (0,0,0) lands at local (-10,0,0).
        assert_relative_eq!(f64::from(vertices[0].position[0]), -10.0, epsilon = 1e-6);
    }

    #[test]
    fn rotated_frame_counter_rotates_normals() {
        let mesh = square_mesh();
        let mut frame = Frame::new();
        frame.set_rotation(UnitQuaternion::from_axis_angle(
            &Vector3::x_axis(),
            std::f64::consts::FRAC_PI_2,
        ));
        let bytes = ProjectToFrame::new(&mesh, &frame)
            .execute(&VertexFormat::standard())
            .unwrap();

        let vertices = unpack(&bytes);
        // Top cap ambient normal +Z becomes local +Y under the inverse of
        // a +90° rotation about X.
        assert_relative_eq!(f64::from(vertices[0].normal[1]), 1.0, epsilon = 1e-6);
        assert_relative_eq!(f64::from(vertices[0].normal[2]), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn scaled_frame_keeps_normals_unit_length() {
        let mesh = square_mesh();
        let mut frame = Frame::new();
        frame.set_scale(Vector3::new(2.0, 0.5, 3.0));
        let bytes = ProjectToFrame::new(&mesh, &frame)
            .execute(&VertexFormat::standard())
            .unwrap();

        for vertex in unpack(&bytes) {
            let len = vertex
                .normal
                .iter()
                .map(|c| f64::from(*c) * f64::from(*c))
                .sum::<f64>()
                .sqrt();
            assert_relative_eq!(len, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn non_invertible_frame_yields_no_data() {
        let mesh = square_mesh();
        let mut frame = Frame::new();
        frame.set_scale(Vector3::new(0.0, 1.0, 1.0));
        assert!(ProjectToFrame::new(&mesh, &frame)
            .execute(&VertexFormat::standard())
            .is_none());
    }
}
