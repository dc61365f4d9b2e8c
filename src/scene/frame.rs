use crate::math::{Matrix4, Point3, UnitQuaternion, Vector3};

use super::invalidate::ChangeBus;

/// The world transform of a scene object: position, rotation and scale.
///
/// Every setter that actually changes a value notifies the frame's change
/// bus, so dependents that subscribed a dirty flag see the move.
#[derive(Debug)]
pub struct Frame {
    position: Point3,
    rotation: UnitQuaternion,
    scale: Vector3,
    changed: ChangeBus,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            changed: ChangeBus::new(),
        }
    }
}

impl Frame {
    /// Creates an identity frame at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an identity-oriented frame at the given position.
    #[must_use]
    pub fn from_position(position: Point3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Returns the position.
    #[must_use]
    pub fn position(&self) -> &Point3 {
        &self.position
    }

    /// Returns the rotation.
    #[must_use]
    pub fn rotation(&self) -> &UnitQuaternion {
        &self.rotation
    }

    /// Returns the scale.
    #[must_use]
    pub fn scale(&self) -> &Vector3 {
        &self.scale
    }

    /// Returns the change bus dependents subscribe to.
    #[must_use]
    pub fn changed(&self) -> &ChangeBus {
        &self.changed
    }

    /// Sets the position, notifying on change.
    pub fn set_position(&mut self, position: Point3) {
        if self.position != position {
            self.position = position;
            self.changed.notify();
        }
    }

    /// Sets the rotation, notifying on change.
    pub fn set_rotation(&mut self, rotation: UnitQuaternion) {
        if self.rotation != rotation {
            self.rotation = rotation;
            self.changed.notify();
        }
    }

    /// Sets the scale, notifying on change.
    pub fn set_scale(&mut self, scale: Vector3) {
        if self.scale != scale {
            self.scale = scale;
            self.changed.notify();
        }
    }

    /// Resets position and rotation in one step, notifying at most once.
    pub fn set_pose(&mut self, position: Point3, rotation: UnitQuaternion) {
        if self.position != position || self.rotation != rotation {
            self.position = position;
            self.rotation = rotation;
            self.changed.notify();
        }
    }

    /// Returns the local-to-world matrix (translation × rotation × scale).
    #[must_use]
    pub fn to_matrix(&self) -> Matrix4 {
        Matrix4::new_translation(&self.position.coords)
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }
}
