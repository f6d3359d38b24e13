pub mod color;
pub mod composer;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod material;
pub mod orbit;
pub mod panel;
pub mod picking;
pub mod registry;
pub mod spring;
pub mod texture_cache;
pub mod view;

pub use color::*;
pub use composer::*;
pub use config::*;
pub use constants::*;
pub use geometry::*;
pub use material::*;
pub use orbit::*;
pub use panel::*;
pub use picking::*;
pub use registry::*;
pub use spring::*;
pub use texture_cache::*;
pub use view::*;
