pub mod point_set;
pub mod polyhedron;

pub use point_set::{PointData, PointId, PointSet};
pub use polyhedron::PolygonGeometry;
