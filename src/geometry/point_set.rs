use slotmap::SlotMap;

use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a point in a [`PointSet`].
    pub struct PointId;
}

/// Data associated with an authored polygon point.
#[derive(Debug, Clone)]
pub struct PointData {
    /// Name unique within the owning set ("Point 1", "Point 2", ...).
    pub name: String,
    /// Position in the ambient frame.
    pub position: Point3,
}

/// Ordered arena of named points.
///
/// Points are owned by the set (containment, not pointers) and referenced
/// by ID. The explicit ordering vector preserves insertion order, which
/// directly determines polygon winding.
#[derive(Debug, Default)]
pub struct PointSet {
    points: SlotMap<PointId, PointData>,
    order: Vec<PointId>,
}

impl PointSet {
    /// Creates a new, empty point set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the set contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Adds a point at the end of the order, assigning the next unique
    /// name.
    pub fn add(&mut self, position: Point3) -> PointId {
        let name = self.unique_name();
        self.add_named(name, position)
    }

    /// Adds a point with an explicit name (used by deserialization).
    pub fn add_named(&mut self, name: impl Into<String>, position: Point3) -> PointId {
        let id = self.points.insert(PointData {
            name: name.into(),
            position,
        });
        self.order.push(id);
        id
    }

    /// Removes a point, returning its data if it existed.
    pub fn remove(&mut self, id: PointId) -> Option<PointData> {
        let data = self.points.remove(id)?;
        self.order.retain(|&other| other != id);
        Some(data)
    }

    /// Moves a point, returning whether the position actually changed.
    ///
    /// A missing ID is treated as no change.
    pub fn set_position(&mut self, id: PointId, position: Point3) -> bool {
        match self.points.get_mut(id) {
            Some(data) if data.position != position => {
                data.position = position;
                true
            }
            _ => false,
        }
    }

    /// Returns a reference to the point data.
    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&PointData> {
        self.points.get(id)
    }

    /// Iterates points in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &PointData)> {
        self.order.iter().filter_map(|&id| Some((id, self.points.get(id)?)))
    }

    /// Returns all positions in insertion order.
    #[must_use]
    pub fn positions(&self) -> Vec<Point3> {
        self.iter().map(|(_, data)| data.position).collect()
    }

    /// Smallest unused "Point N" name, starting from 1.
    fn unique_name(&self) -> String {
        let mut n = 1usize;
        loop {
            let candidate = format!("Point {n}");
            if !self.points.values().any(|data| data.name == candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn names_are_sequential_and_unique() {
        let mut set = PointSet::new();
        let a = set.add(p(0.0, 0.0, 0.0));
        let b = set.add(p(1.0, 0.0, 0.0));
        assert_eq!(set.get(a).unwrap().name, "Point 1");
        assert_eq!(set.get(b).unwrap().name, "Point 2");
    }

    #[test]
    fn removed_name_is_reused() {
        let mut set = PointSet::new();
        let a = set.add(p(0.0, 0.0, 0.0));
        let _b = set.add(p(1.0, 0.0, 0.0));
        set.remove(a);
        let c = set.add(p(2.0, 0.0, 0.0));
        assert_eq!(set.get(c).unwrap().name, "Point 1");
    }

    #[test]
    fn positions_follow_insertion_order() {
        let mut set = PointSet::new();
        set.add(p(0.0, 0.0, 0.0));
        set.add(p(1.0, 0.0, 0.0));
        set.add(p(2.0, 0.0, 0.0));
        let xs: Vec<f64> = set.positions().iter().map(|pos| pos.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut set = PointSet::new();
        let _a = set.add(p(0.0, 0.0, 0.0));
        let b = set.add(p(1.0, 0.0, 0.0));
        let _c = set.add(p(2.0, 0.0, 0.0));
        set.remove(b);
        let xs: Vec<f64> = set.positions().iter().map(|pos| pos.x).collect();
        assert_eq!(xs, vec![0.0, 2.0]);
    }

    #[test]
    fn set_position_reports_change() {
        let mut set = PointSet::new();
        let a = set.add(p(0.0, 0.0, 0.0));
        assert!(set.set_position(a, p(1.0, 0.0, 0.0)));
        assert!(!set.set_position(a, p(1.0, 0.0, 0.0)));
    }
}
