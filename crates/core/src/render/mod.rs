pub mod compositor;
pub mod frame;

pub use compositor::{RenderedLine, render};
pub use frame::Frame;
