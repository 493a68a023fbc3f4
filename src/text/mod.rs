pub mod diff;
pub mod position;

pub use diff::{EditOp, diff};
pub use position::{PositionMapper, compute_line_starts};
