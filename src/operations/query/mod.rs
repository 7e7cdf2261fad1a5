mod bounds;
mod point_in_polygon;

pub use bounds::{bounds, bounds_paths};
pub use point_in_polygon::{point_in_polygon, point_in_polygon_d, PointInPolygonResult};
