pub mod camera;
pub mod constants;
pub mod curve;
pub mod flights;
pub mod geo;
pub mod geometry;
pub mod locations;
pub mod markers;
pub mod overlay;
pub mod paths;
pub mod picking;
pub mod scene;
pub mod selection;

pub use camera::*;
pub use constants::*;
pub use curve::*;
pub use flights::*;
pub use geo::*;
pub use geometry::*;
pub use locations::*;
pub use markers::*;
pub use overlay::*;
pub use paths::*;
pub use picking::*;
pub use scene::*;
pub use selection::*;
