//! Blockout debug runner — derives a sample polyhedron and logs the result.
//!
//! Usage:
//! ```text
//! cargo run --example debug
//! ```
//!
//! Override log levels with `RUST_LOG` (e.g. `RUST_LOG=blockout=debug`).

use blockout::geometry::PolygonGeometry;
use blockout::math::Point3;
use blockout::scene::Frame;

fn main() {
    // Default: WARN for everything, INFO for blockout.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("debug=info".parse().unwrap_or_default())
        .add_directive("blockout=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let frame = Frame::from_position(Point3::new(0.0, 0.0, 1.0));

    let mut geometry = PolygonGeometry::new();
    geometry.add_point(Point3::new(0.0, 0.0, 0.0));
    geometry.add_point(Point3::new(2.0, 0.0, 0.0));
    geometry.add_point(Point3::new(2.0, 2.0, 0.0));
    geometry.add_point(Point3::new(0.0, 2.0, 0.0));
    geometry.set_height(1.5);

    match geometry.generated_data(&frame) {
        Some(data) => {
            let vertex_size = data.format.vertex_size();
            tracing::info!(
                vertices = data.vertices.len() / vertex_size,
                indices = data.indices.len(),
                faces = data.structure.faces.len(),
                "derived polyhedron"
            );
        }
        None => tracing::warn!("derivation produced no mesh"),
    }
}
