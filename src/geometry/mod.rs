pub mod poly_tree;
pub mod rect;

pub use poly_tree::{poly_tree_to_paths, PolyTree, PolyTree64, PolyTreeD};
pub use rect::{Rect, Rect64, RectD};
