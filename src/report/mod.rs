//! Distance tables and chart rendering.

mod chart;
mod style;
mod table;

pub use chart::{ChartError, ClearanceChart};
pub use style::{palette, ChartStyle};
pub use table::DistanceTable;
