use crate::geometry::PolygonGeometry;
use crate::math::polygon::centroid;
use crate::math::{Point2, Point3, UnitQuaternion, Vector2, Vector3};
use crate::scene::Frame;

use super::viewport::{Key, MouseButton, OverlayQuad, Rect, SurfaceHit, Viewport};

/// Hit-rectangle size over the first point, at camera distance zero.
const START_RECT_MAX_SIZE: f64 = 20.0;
/// Hit-rectangle size at [`START_RECT_MAX_DISTANCE`].
const START_RECT_MIN_SIZE: f64 = 5.0;
/// Beyond this camera distance the first point gets no hit rectangle.
const START_RECT_MAX_DISTANCE: f64 = 100.0;

const HOVER_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 0.5];
const IDLE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.3];

/// Stage of an authoring session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Placing polygon points with the mouse.
    PlacingPoints,
    /// Dragging out the extrusion height.
    SettingHeight,
    /// Finished successfully; the session is inert.
    Finished,
    /// Aborted; the session is inert. Already-placed points remain.
    Cancelled,
}

/// Result of finishing a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishOutcome {
    /// Whether the session was cancelled.
    pub cancelled: bool,
    /// Whether the editor should select the owning object.
    pub select_owner: bool,
}

/// Interactive creation of a [`PolygonGeometry`]: turns viewport input
/// into point placements and a height value.
///
/// One dispatch object with an explicit stage enum; the editor forwards
/// mouse and key events and polls [`stage`](Self::stage) to learn when
/// the session ended.
#[derive(Debug)]
pub struct CreationSession {
    stage: Stage,
    /// Cursor hit position recorded when the height stage started.
    height_anchor: Point3,
    /// Polygon normal recorded when the height stage started.
    height_axis: Vector3,
    /// Screen hit rectangle of the first point, from the last overlay
    /// update. `None` when no rectangle was drawn.
    start_point_rect: Option<Rect>,
}

impl CreationSession {
    /// Starts a session, placing the first point at the cursor's surface
    /// hit (or at the owning frame's position when nothing is hit).
    pub fn begin(
        viewport: &dyn Viewport,
        geometry: &mut PolygonGeometry,
        frame: &Frame,
    ) -> Self {
        let position = Self::probe(viewport).map_or(*frame.position(), |hit| hit.position);
        geometry.add_point(position);

        Self {
            stage: Stage::PlacingPoints,
            height_anchor: Point3::origin(),
            height_axis: Vector3::z(),
            start_point_rect: None,
        }
    }

    /// Returns the current stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns `true` while the session still consumes input.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.stage, Stage::PlacingPoints | Stage::SettingHeight)
    }

    /// Surface probe, suppressed while the cursor is captured for camera
    /// look.
    fn probe(viewport: &dyn Viewport) -> Option<SurfaceHit> {
        if viewport.mouse_relative_mode() {
            return None;
        }
        viewport.surface_under_cursor()
    }

    fn start_height_stage(&mut self, viewport: &dyn Viewport, geometry: &PolygonGeometry) {
        self.stage = Stage::SettingHeight;
        if let Some(hit) = Self::probe(viewport) {
            self.height_anchor = hit.position;
        }
        self.height_axis = *geometry.polygon_plane().normal();
    }

    /// Handles a mouse-button press. Returns whether the event was
    /// consumed.
    pub fn on_mouse_down(
        &mut self,
        viewport: &dyn Viewport,
        button: MouseButton,
        geometry: &mut PolygonGeometry,
        frame: &mut Frame,
    ) -> bool {
        if button != MouseButton::Left || !self.is_active() {
            return false;
        }

        if self.stage == Stage::SettingHeight {
            self.finish(false, geometry, frame);
            return true;
        }

        let over_start_point = self
            .start_point_rect
            .is_some_and(|rect| rect.contains(viewport.mouse_position()));
        if over_start_point {
            self.start_height_stage(viewport, geometry);
            return true;
        }

        if viewport.mouse_relative_mode() {
            return false;
        }

        if geometry.points().len() >= 3 {
            // The loop's plane is fixed by its first three points; later
            // points are placed by intersecting the view ray with it.
            let plane = geometry.polygon_plane();
            let Some(ray) = viewport.ray_through(viewport.mouse_position()) else {
                return false;
            };
            let Some(position) = ray.intersect_plane(&plane) else {
                tracing::debug!("view ray misses polygon plane, placement skipped");
                return false;
            };
            geometry.add_point(position);
            true
        } else if let Some(hit) = viewport.surface_under_cursor() {
            geometry.add_point(hit.position);
            self.detect_clockwise(viewport, geometry);
            true
        } else {
            false
        }
    }

    /// Infers the clockwise flag when exactly the third point lands: if
    /// the polygon normal points away from the camera, the visible
    /// winding is clockwise.
    fn detect_clockwise(&self, viewport: &dyn Viewport, geometry: &mut PolygonGeometry) {
        let positions = geometry.point_positions();
        if positions.len() != 3 {
            return;
        }
        let normal = *geometry.polygon_plane().normal();
        let center = centroid(&positions);
        let camera = viewport.camera_position();

        let to_center = (center - camera).norm();
        let to_center_plus_normal = (center + normal - camera).norm();
        if to_center < to_center_plus_normal {
            geometry.set_clockwise(true);
        }
    }

    /// Handles pointer movement. While setting height, the cursor ray is
    /// projected onto the line through the anchor along the polygon
    /// normal and the distance to the anchor becomes the height.
    pub fn on_mouse_move(
        &mut self,
        viewport: &dyn Viewport,
        mouse: Point2,
        geometry: &mut PolygonGeometry,
    ) {
        if self.stage != Stage::SettingHeight {
            return;
        }
        let Some(ray) = viewport.ray_through(mouse) else {
            return;
        };
        let Some(along) = ray.project_onto_line(&self.height_anchor, &self.height_axis) else {
            tracing::debug!("view ray parallel to height axis, update skipped");
            return;
        };
        geometry.set_height(along.abs());
    }

    /// Handles a key press. Returns whether the event was consumed.
    pub fn on_key_down(
        &mut self,
        viewport: &dyn Viewport,
        key: Key,
        geometry: &mut PolygonGeometry,
        frame: &mut Frame,
    ) -> bool {
        if !self.is_active() {
            return false;
        }
        match key {
            Key::Space | Key::Return => {
                if self.stage == Stage::PlacingPoints {
                    self.start_height_stage(viewport, geometry);
                } else {
                    self.finish(false, geometry, frame);
                }
                true
            }
            Key::Escape => {
                self.finish(true, geometry, frame);
                true
            }
        }
    }

    /// Per-frame overlay update: computes the first point's hit rectangle
    /// (distance-attenuated) and returns the quad to draw, if any. Also
    /// refreshes the rectangle used by the next click's hit test.
    pub fn update_overlay(
        &mut self,
        viewport: &dyn Viewport,
        geometry: &PolygonGeometry,
    ) -> Option<OverlayQuad> {
        self.start_point_rect = None;

        if self.stage != Stage::PlacingPoints {
            return None;
        }
        let positions = geometry.point_positions();
        if positions.len() <= 2 {
            return None;
        }
        let screen = viewport.project_to_screen(&positions[0])?;

        let distance = (positions[0] - viewport.camera_position()).norm();
        if distance >= START_RECT_MAX_DISTANCE {
            return None;
        }

        // Full size at the camera, shrinking linearly to the minimum.
        let t = distance / START_RECT_MAX_DISTANCE;
        let size_px = START_RECT_MAX_SIZE + (START_RECT_MIN_SIZE - START_RECT_MAX_SIZE) * t;
        let size = Vector2::new(size_px, size_px)
            .component_div(&viewport.size_in_pixels())
            * 1.5;
        let half = size * 0.5;
        let rect = Rect::new(screen - half, screen + half);

        let hover =
            !viewport.mouse_relative_mode() && rect.contains(viewport.mouse_position());
        let color = if hover { HOVER_COLOR } else { IDLE_COLOR };

        self.start_point_rect = Some(rect);
        Some(OverlayQuad { rect, color })
    }

    /// The two instruction lines for the editor's corner text, per stage.
    #[must_use]
    pub fn instructions(&self) -> [&'static str; 2] {
        if self.stage == Stage::SettingHeight {
            [
                "Specify height of the object.",
                "Press Space, Return or click mouse button to finish creation.",
            ]
        } else {
            [
                "Specify points of the object.",
                "Press Space or Return to finish creation of the points.",
            ]
        }
    }

    /// Ends the session.
    ///
    /// On success the owning frame's origin is relocated to the centroid
    /// of the placed points (rotation reset to identity) and a recompute
    /// is forced; the points keep their ambient positions, so they stay
    /// attached under the new frame. On cancel nothing is rolled back:
    /// already-placed points remain in the geometry.
    pub fn finish(
        &mut self,
        cancel: bool,
        geometry: &mut PolygonGeometry,
        frame: &mut Frame,
    ) -> FinishOutcome {
        if cancel {
            self.stage = Stage::Cancelled;
            return FinishOutcome {
                cancelled: true,
                select_owner: false,
            };
        }

        let positions = geometry.point_positions();
        if !positions.is_empty() {
            frame.set_pose(centroid(&positions), UnitQuaternion::identity());
        }
        geometry.mark_dirty();
        self.stage = Stage::Finished;

        FinishOutcome {
            cancelled: false,
            select_owner: true,
        }
    }
}
