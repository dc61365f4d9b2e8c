/// Semantic of one element in a vertex record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexSemantic {
    Position,
    Normal,
    Tangent,
    Color,
    TexCoord0,
}

/// One element of a vertex layout: a semantic and its `f32` component
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexElement {
    /// What the element carries.
    pub semantic: VertexSemantic,
    /// Number of `f32` components.
    pub components: usize,
}

/// Declarative layout of a packed vertex record.
///
/// The byte size is computed from the elements and checked against the
/// size of the packed record type before any buffer is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexFormat {
    elements: Vec<VertexElement>,
}

impl VertexFormat {
    /// The standard static layout: position, normal, tangent, color, one
    /// texture coordinate. Matches [`StandardVertex`].
    #[must_use]
    pub fn standard() -> Self {
        Self {
            elements: vec![
                VertexElement {
                    semantic: VertexSemantic::Position,
                    components: 3,
                },
                VertexElement {
                    semantic: VertexSemantic::Normal,
                    components: 3,
                },
                VertexElement {
                    semantic: VertexSemantic::Tangent,
                    components: 4,
                },
                VertexElement {
                    semantic: VertexSemantic::Color,
                    components: 4,
                },
                VertexElement {
                    semantic: VertexSemantic::TexCoord0,
                    components: 2,
                },
            ],
        }
    }

    /// Returns the elements of the layout.
    #[must_use]
    pub fn elements(&self) -> &[VertexElement] {
        &self.elements
    }

    /// Returns the byte size of one vertex record under this layout.
    #[must_use]
    pub fn vertex_size(&self) -> usize {
        self.elements
            .iter()
            .map(|element| element.components * std::mem::size_of::<f32>())
            .sum()
    }
}

/// The packed vertex record uploaded to the renderer.
///
/// Field order and types must agree with [`VertexFormat::standard`];
/// `ProjectToFrame` verifies the byte sizes match before packing.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StandardVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 4],
    pub color: [f32; 4],
    pub texcoord: [f32; 2],
}
