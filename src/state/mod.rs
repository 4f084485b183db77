pub mod input;
pub mod viewport;

pub use input::{Direction, InputSource, InputState, PressKind};
pub use viewport::Viewport;
