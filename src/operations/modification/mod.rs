mod trim_collinear;

pub use trim_collinear::{trim_collinear, trim_collinear_d};
