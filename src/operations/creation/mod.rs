mod make_path;

pub use make_path::{make_path, make_path_d, make_path_with_skip};
