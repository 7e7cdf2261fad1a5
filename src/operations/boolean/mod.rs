mod boolean_op;
mod engine;

pub use boolean_op::{boolean_op, difference, intersect, union, union_subjects, xor, BooleanOp};
pub use engine::{ClipEngine, ClipType, FillRule};
