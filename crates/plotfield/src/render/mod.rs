//! Document builders that turn generator output into vector documents.
pub mod cells;
pub mod color;
pub mod flow;

pub use cells::{render_grid, CellRenderConfig, CellRenderStyle};
pub use color::parse_color;
pub use flow::{render_polylines, FlowRenderConfig};
