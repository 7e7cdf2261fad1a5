mod translate;

pub use translate::{translate_path, translate_paths};
