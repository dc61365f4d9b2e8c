pub mod session;
pub mod viewport;

pub use session::{CreationSession, FinishOutcome, Stage};
pub use viewport::{Key, MouseButton, OverlayQuad, Rect, SurfaceHit, Viewport};
