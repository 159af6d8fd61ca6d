pub mod instance;

pub use instance::{BoxInstance, RenderBuffer};
