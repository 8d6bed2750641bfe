pub mod side_by_side;
pub mod unified;

pub use side_by_side::{render_pair, PairView, RenderLine, RenderRow};
pub use unified::diff_stats;
