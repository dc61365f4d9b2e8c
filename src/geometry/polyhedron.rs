use std::rc::Rc;

use crate::math::{Plane, Point3};
use crate::meshing::{GeneratedMeshData, ProjectToFrame, ThickenPolygon, VertexFormat};
use crate::scene::{DirtyFlag, Frame, Material, Subscription};

use super::point_set::{PointId, PointSet};

/// Mesh geometry in the form of a polyhedron generated by thickening a
/// polygon.
///
/// The ordered point set, `clockwise`, `height` and `inside_out` are the
/// entire determinant of the derived mesh. Every mutation marks a single
/// dirty flag; recomputation is lazy and happens on the next call to
/// [`generated_data`](Self::generated_data).
#[derive(Debug, Default)]
pub struct PolygonGeometry {
    points: PointSet,
    clockwise: bool,
    height: f64,
    inside_out: bool,
    always_display_point_labels: bool,
    material: Option<Rc<Material>>,
    dirty: DirtyFlag,
    cache: Option<GeneratedMeshData>,
    frame_subscription: Option<Subscription>,
}

impl PolygonGeometry {
    /// Creates an empty geometry with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Parameters ---

    /// Whether the points are clockwise.
    #[must_use]
    pub fn clockwise(&self) -> bool {
        self.clockwise
    }

    /// Sets the clockwise flag, returning whether the value changed.
    pub fn set_clockwise(&mut self, clockwise: bool) -> bool {
        if self.clockwise == clockwise {
            return false;
        }
        self.clockwise = clockwise;
        self.dirty.mark();
        true
    }

    /// The height of the shape.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Sets the height (clamped to be non-negative), returning whether
    /// the value changed.
    #[allow(clippy::float_cmp)]
    pub fn set_height(&mut self, height: f64) -> bool {
        let height = height.max(0.0);
        if self.height == height {
            return false;
        }
        self.height = height;
        self.dirty.mark();
        true
    }

    /// Whether the solid is flipped inside out.
    #[must_use]
    pub fn inside_out(&self) -> bool {
        self.inside_out
    }

    /// Sets the inside-out flag, returning whether the value changed.
    pub fn set_inside_out(&mut self, inside_out: bool) -> bool {
        if self.inside_out == inside_out {
            return false;
        }
        self.inside_out = inside_out;
        self.dirty.mark();
        true
    }

    /// Whether point labels are always displayed, or only while the owner
    /// is selected or being created.
    #[must_use]
    pub fn always_display_point_labels(&self) -> bool {
        self.always_display_point_labels
    }

    /// Sets the label policy. Does not invalidate the mesh: labels are an
    /// editor overlay, not derivation input.
    pub fn set_always_display_point_labels(&mut self, always: bool) -> bool {
        if self.always_display_point_labels == always {
            return false;
        }
        self.always_display_point_labels = always;
        true
    }

    /// Label-visibility policy for the editor overlay.
    #[must_use]
    pub fn display_point_labels(&self, owner_selected: bool, being_created: bool) -> bool {
        self.always_display_point_labels || owner_selected || being_created
    }

    /// Returns the assigned material, if any.
    #[must_use]
    pub fn material(&self) -> Option<&Rc<Material>> {
        self.material.as_ref()
    }

    /// Assigns a shared material carried through the generated data.
    pub fn set_material(&mut self, material: Option<Rc<Material>>) {
        self.material = material;
        self.dirty.mark();
    }

    // --- Points ---

    /// Returns the point set.
    #[must_use]
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// Adds a point at the end of the loop.
    pub fn add_point(&mut self, position: Point3) -> PointId {
        let id = self.points.add(position);
        self.dirty.mark();
        id
    }

    /// Removes a point, returning whether it existed.
    pub fn remove_point(&mut self, id: PointId) -> bool {
        let removed = self.points.remove(id).is_some();
        if removed {
            self.dirty.mark();
        }
        removed
    }

    /// Moves a point, returning whether the position changed.
    pub fn move_point(&mut self, id: PointId, position: Point3) -> bool {
        let moved = self.points.set_position(id, position);
        if moved {
            self.dirty.mark();
        }
        moved
    }

    /// Returns all point positions in loop order (ambient frame).
    #[must_use]
    pub fn point_positions(&self) -> Vec<Point3> {
        self.points.positions()
    }

    /// Returns the plane of the first three points, or the XY plane while
    /// fewer than three points exist (or the first three are collinear).
    #[must_use]
    pub fn polygon_plane(&self) -> Plane {
        let positions = self.points.positions();
        if positions.len() >= 3 {
            if let Ok(plane) = Plane::from_points(positions[0], positions[1], positions[2]) {
                return plane;
            }
        }
        Plane::xy()
    }

    // --- Invalidation ---

    /// Marks the derived mesh stale. Idempotent.
    pub fn mark_dirty(&self) {
        self.dirty.mark();
    }

    /// Returns whether the derived mesh is currently stale.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    /// Enables or disables the geometry against its owner's frame.
    ///
    /// While enabled, the geometry's dirty flag is subscribed to the
    /// frame's change bus, so moving the owner invalidates the mesh.
    /// Disabling drops the subscription (RAII teardown), so a disabled
    /// geometry incurs no recompute cost and no stale callbacks.
    pub fn set_enabled(&mut self, frame: &Frame, enabled: bool) {
        if enabled {
            if self.frame_subscription.is_none() {
                self.frame_subscription = Some(frame.changed().subscribe(self.dirty.clone()));
            }
        } else {
            self.frame_subscription = None;
        }
    }

    /// Returns whether the geometry is enabled (subscribed to its frame).
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.frame_subscription.is_some()
    }

    // --- Derivation ---

    /// Returns the current derived mesh, recomputing it first if stale.
    ///
    /// Returns `None` when fewer than 3 points exist, the polygon is
    /// degenerate, or the owning frame cannot be resolved; that is the
    /// documented "nothing to render yet" state, not an error.
    pub fn generated_data(&mut self, frame: &Frame) -> Option<&GeneratedMeshData> {
        if self.dirty.take() || self.cache.is_none() {
            self.cache = self.derive(frame);
        }
        self.cache.as_ref()
    }

    fn derive(&self, frame: &Frame) -> Option<GeneratedMeshData> {
        let positions = self.points.positions();
        if positions.len() < 3 {
            return None;
        }

        let derived =
            match ThickenPolygon::new(positions, self.clockwise, self.height, self.inside_out)
                .execute()
            {
                Ok(derived) => derived,
                Err(error) => {
                    tracing::debug!(%error, "polygon cannot be thickened, producing no mesh");
                    return None;
                }
            };

        let format = VertexFormat::standard();
        let vertices = ProjectToFrame::new(&derived, frame).execute(&format)?;

        tracing::debug!(
            vertices = derived.vertex_count(),
            triangles = derived.indices.len() / 3,
            "recomputed polyhedron mesh"
        );

        Some(GeneratedMeshData {
            format,
            vertices,
            indices: derived.indices,
            material: self.material.clone(),
            structure: derived.structure,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn square_geometry() -> PolygonGeometry {
        let mut geometry = PolygonGeometry::new();
        geometry.add_point(p(0.0, 0.0, 0.0));
        geometry.add_point(p(1.0, 0.0, 0.0));
        geometry.add_point(p(1.0, 1.0, 0.0));
        geometry.add_point(p(0.0, 1.0, 0.0));
        geometry.set_height(1.0);
        geometry
    }

    // ── Empty state ────────────────────────────────────────────

    #[test]
    fn fewer_than_three_points_produces_no_data() {
        let frame = Frame::new();
        for count in 0..3 {
            let mut geometry = PolygonGeometry::new();
            for i in 0..count {
                geometry.add_point(p(f64::from(i), 0.0, 0.0));
            }
            assert!(geometry.generated_data(&frame).is_none());
        }
    }

    #[test]
    fn collinear_points_produce_no_data() {
        let frame = Frame::new();
        let mut geometry = PolygonGeometry::new();
        geometry.add_point(p(0.0, 0.0, 0.0));
        geometry.add_point(p(1.0, 0.0, 0.0));
        geometry.add_point(p(2.0, 0.0, 0.0));
        assert!(geometry.generated_data(&frame).is_none());
    }

    // ── Invalidation ───────────────────────────────────────────

    #[test]
    fn setters_mark_dirty_only_on_change() {
        let mut geometry = square_geometry();
        let frame = Frame::new();
        geometry.generated_data(&frame);
        assert!(!geometry.is_dirty());

        assert!(!geometry.set_clockwise(false));
        assert!(!geometry.is_dirty());

        assert!(geometry.set_clockwise(true));
        assert!(geometry.is_dirty());
    }

    #[test]
    fn label_policy_does_not_invalidate() {
        let mut geometry = square_geometry();
        let frame = Frame::new();
        geometry.generated_data(&frame);

        assert!(geometry.set_always_display_point_labels(true));
        assert!(!geometry.is_dirty());
        assert!(geometry.display_point_labels(false, false));
    }

    #[test]
    fn recompute_is_lazy_and_clears_dirty() {
        let mut geometry = square_geometry();
        let frame = Frame::new();

        geometry.set_height(2.0);
        assert!(geometry.is_dirty());

        let data = geometry.generated_data(&frame).unwrap().clone();
        assert!(!geometry.is_dirty());

        // Clean geometry returns the cached mesh unchanged.
        let again = geometry.generated_data(&frame).unwrap();
        assert_eq!(data.vertices, again.vertices);
        assert_eq!(data.indices, again.indices);
    }

    #[test]
    fn parameter_change_recomputes_on_next_request() {
        let mut geometry = square_geometry();
        let frame = Frame::new();

        let flat = geometry.generated_data(&frame).unwrap().indices.len();
        geometry.set_height(0.0);
        let degenerate = geometry.generated_data(&frame).unwrap().indices.len();
        assert!(degenerate < flat); // side quads disappeared
    }

    #[test]
    fn point_mutations_mark_dirty() {
        let mut geometry = square_geometry();
        let frame = Frame::new();
        geometry.generated_data(&frame);

        let id = geometry.add_point(p(0.5, 1.5, 0.0));
        assert!(geometry.is_dirty());
        geometry.generated_data(&frame);

        assert!(geometry.move_point(id, p(0.5, 2.0, 0.0)));
        assert!(geometry.is_dirty());
        geometry.generated_data(&frame);

        assert!(geometry.remove_point(id));
        assert!(geometry.is_dirty());
    }

    // ── Frame subscription ─────────────────────────────────────

    #[test]
    fn enabled_geometry_sees_owner_moves() {
        let mut geometry = square_geometry();
        let mut frame = Frame::new();
        geometry.set_enabled(&frame, true);
        geometry.generated_data(&frame);
        assert!(!geometry.is_dirty());

        frame.set_position(p(5.0, 0.0, 0.0));
        assert!(geometry.is_dirty());
    }

    #[test]
    fn disabled_geometry_ignores_owner_moves() {
        let mut geometry = square_geometry();
        let mut frame = Frame::new();
        geometry.set_enabled(&frame, true);
        geometry.set_enabled(&frame, false);
        assert!(!geometry.is_enabled());
        assert_eq!(frame.changed().subscriber_count(), 0);

        geometry.generated_data(&frame);
        frame.set_position(p(5.0, 0.0, 0.0));
        assert!(!geometry.is_dirty());
    }

    // ── Output contract ────────────────────────────────────────

    #[test]
    fn generated_data_carries_material_and_structure() {
        let mut geometry = square_geometry();
        let frame = Frame::new();
        geometry.set_material(Some(Rc::new(Material::new("WhiteMatte"))));

        let data = geometry.generated_data(&frame).unwrap();
        assert_eq!(data.material.as_ref().unwrap().name, "WhiteMatte");
        assert_eq!(data.structure.faces.len(), 6);
        assert_eq!(
            data.vertices.len(),
            data.format.vertex_size() * 24 // flat-shaded cube
        );
    }

    #[test]
    fn polygon_plane_falls_back_to_xy() {
        let geometry = PolygonGeometry::new();
        let plane = geometry.polygon_plane();
        assert_eq!(plane.normal().z, 1.0);
    }
}
