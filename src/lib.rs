//! Blockout: an interactive block-out geometry authoring kernel.
//!
//! A scene author places an ordered polygon of points in 3D space and
//! thickens it into a closed prism-like solid. The crate provides the
//! authoring state machine ([`authoring::CreationSession`]), the
//! invalidation-driven derivation pipeline ([`geometry::PolygonGeometry`])
//! and the geometric derivation itself ([`meshing::ThickenPolygon`]).
//! Scene-graph ownership, rendering and the editor viewport are external
//! collaborators consumed through the contracts in [`authoring::Viewport`]
//! and [`scene`].

pub mod authoring;
pub mod error;
pub mod geometry;
pub mod math;
pub mod meshing;
pub mod scene;

pub use error::{BlockoutError, Result};
