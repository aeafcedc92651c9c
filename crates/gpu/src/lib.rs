pub mod camera;
pub mod renderer;
pub mod surface;

pub use camera::*;
pub use renderer::*;
pub use surface::*;
