pub mod frame;
pub mod invalidate;

pub use frame::Frame;
pub use invalidate::{ChangeBus, DirtyFlag, Subscription};

slotmap::new_key_type! {
    /// Opaque handle to an object owned by the external scene graph.
    ///
    /// Returned by the viewport's surface probe to identify what the cursor
    /// hit; the kernel never dereferences it.
    pub struct ObjectId;
}

/// A material shared between geometries.
///
/// The kernel only carries a reference to it through the generated-data
/// contract; interpretation is the renderer's concern.
#[derive(Debug, Clone)]
pub struct Material {
    /// Asset name of the material.
    pub name: String,
}

impl Material {
    /// Creates a material reference with the given asset name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
