use crate::math::{Point2, Point3, Ray, Vector2};
use crate::scene::ObjectId;

/// Mouse buttons the authoring session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keys the authoring session reacts to.
///
/// Space and Return confirm; Escape cancels. The editor glue maps real
/// key events to these before dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Return,
    Escape,
}

/// An axis-aligned rectangle in normalized screen coordinates (0..1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point2,
    pub max: Point2,
}

impl Rect {
    /// Creates a rectangle from its corners.
    #[must_use]
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Returns `true` if the point lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: Point2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Result of the "surface under cursor" probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Hit position in the ambient frame.
    pub position: Point3,
    /// The scene object the probe collided with, if any.
    pub collided: Option<ObjectId>,
}

/// A colored quad the session asks the editor UI to draw over the first
/// point's hit rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayQuad {
    pub rect: Rect,
    /// RGBA color, components in 0..1.
    pub color: [f32; 4],
}

/// The viewport/input collaborator consumed by [`CreationSession`].
///
/// Mouse positions and screen projections are in normalized screen
/// coordinates (0..1 across the viewport).
///
/// [`CreationSession`]: super::CreationSession
pub trait Viewport {
    /// Current mouse position.
    fn mouse_position(&self) -> Point2;

    /// Whether the cursor is captured for camera look. Point placement is
    /// suppressed while captured.
    fn mouse_relative_mode(&self) -> bool;

    /// Viewport dimensions in pixels.
    fn size_in_pixels(&self) -> Vector2;

    /// Camera position in the ambient frame.
    fn camera_position(&self) -> Point3;

    /// Constructs the world-space ray through a screen coordinate, or
    /// `None` when the viewport cannot produce one this frame.
    fn ray_through(&self, screen: Point2) -> Option<Ray>;

    /// Probes for a surface under the cursor.
    fn surface_under_cursor(&self) -> Option<SurfaceHit>;

    /// Projects a world point to screen coordinates, or `None` when it is
    /// outside the view.
    fn project_to_screen(&self, world: &Point3) -> Option<Point2>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_boundary_and_interior() {
        let rect = Rect::new(Point2::new(0.2, 0.2), Point2::new(0.4, 0.4));
        assert!(rect.contains(Point2::new(0.3, 0.3)));
        assert!(rect.contains(Point2::new(0.2, 0.4)));
        assert!(!rect.contains(Point2::new(0.5, 0.3)));
    }
}
