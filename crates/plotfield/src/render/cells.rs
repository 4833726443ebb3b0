//! Builds a vector document from a cellular-automaton grid.
use crate::automaton::Grid;
use crate::document::{PathPrimitive, VectorDocument};

/// How living cells are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellRenderStyle {
    /// Filled square per cell.
    Squares,
    /// Stroked circle per cell.
    Circles,
    /// Small filled dot per cell.
    Dots,
}

/// Styling for grid rendering.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct CellRenderConfig {
    pub cell_size: f32,
    pub margin: f32,
    pub style: CellRenderStyle,
    pub color: String,
    pub background: Option<String>,
}

impl Default for CellRenderConfig {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            margin: 10.0,
            style: CellRenderStyle::Squares,
            color: "#000000".to_owned(),
            background: Some("white".to_owned()),
        }
    }
}

impl CellRenderConfig {
    pub fn new(style: CellRenderStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    /// Sets the cell size.
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Sets the outer margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the cell color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets or clears the background color.
    pub fn with_background(mut self, background: Option<String>) -> Self {
        self.background = background;
        self
    }
}

/// Builds a document from the living cells of a grid.
///
/// Document size is grid dimensions times cell size plus the margin on each
/// side. Cells scan top-left to bottom-right, so output order is stable for
/// a given grid.
pub fn render_grid(grid: &Grid, config: &CellRenderConfig) -> VectorDocument {
    let cell = config.cell_size;
    let margin = config.margin;
    let width = grid.width() as f32 * cell + margin * 2.0;
    let height = grid.height() as f32 * cell + margin * 2.0;

    let mut doc = VectorDocument::new(width, height);
    doc.background = config.background.clone();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if !grid.is_alive(x, y) {
                continue;
            }
            let px = margin + x as f32 * cell;
            let py = margin + y as f32 * cell;
            let primitive = match config.style {
                CellRenderStyle::Squares => {
                    PathPrimitive::rect(px, py, cell, cell).with_fill(config.color.clone())
                }
                CellRenderStyle::Circles => {
                    PathPrimitive::circle(px + cell * 0.5, py + cell * 0.5, cell * 0.45)
                        .with_stroke(config.color.clone())
                }
                CellRenderStyle::Dots => {
                    PathPrimitive::circle(px + cell * 0.5, py + cell * 0.5, cell * 0.15)
                        .with_fill(config.color.clone())
                }
            };
            doc.push(primitive);
        }
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::{patterns, Automaton};

    fn blinker_grid() -> Grid {
        let mut life = Automaton::try_new(5, 5).unwrap();
        life.load_pattern(&patterns::blinker(), 1, 2);
        life.grid()
    }

    #[test]
    fn one_primitive_per_living_cell() {
        let grid = blinker_grid();
        let doc = render_grid(&grid, &CellRenderConfig::default());
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn document_size_includes_margins() {
        let grid = blinker_grid();
        let config = CellRenderConfig::default()
            .with_cell_size(8.0)
            .with_margin(10.0);
        let doc = render_grid(&grid, &config);
        assert_eq!(doc.width, 5.0 * 8.0 + 20.0);
        assert_eq!(doc.height, 5.0 * 8.0 + 20.0);
    }

    #[test]
    fn squares_fill_and_circles_stroke() {
        let grid = blinker_grid();

        let squares = render_grid(&grid, &CellRenderConfig::new(CellRenderStyle::Squares));
        assert!(squares
            .primitives
            .iter()
            .all(|p| matches!(p, PathPrimitive::Rect { .. }) && p.fill().is_some()));

        let circles = render_grid(&grid, &CellRenderConfig::new(CellRenderStyle::Circles));
        assert!(circles
            .primitives
            .iter()
            .all(|p| matches!(p, PathPrimitive::Circle { .. }) && p.stroke().is_some()));

        let dots = render_grid(&grid, &CellRenderConfig::new(CellRenderStyle::Dots));
        assert!(dots
            .primitives
            .iter()
            .all(|p| matches!(p, PathPrimitive::Circle { .. }) && p.fill().is_some()));
    }

    #[test]
    fn cells_are_offset_by_margin() {
        let grid = blinker_grid();
        let config = CellRenderConfig::new(CellRenderStyle::Squares)
            .with_cell_size(10.0)
            .with_margin(20.0);
        let doc = render_grid(&grid, &config);
        match &doc.primitives[0] {
            PathPrimitive::Rect { x, y, .. } => {
                // Leftmost blinker cell is at grid (1, 2).
                assert_eq!(*x, 20.0 + 10.0);
                assert_eq!(*y, 20.0 + 20.0);
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }
}
