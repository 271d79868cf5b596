//! Figure factory
//!
//! Figures are created at one of the house size presets and own their plot
//! areas. Axes are addressed by [`AxesId`] handles, so several figures can be
//! open at once without any shared "current figure" state.

pub mod axes;
pub mod types;

use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use axes::{Axes, GridStyle, Legend, LegendBox, LegendLocation, Line, LineStyle};
pub use types::{BoundingBox, Point, Rgb};

use crate::error::{Error, Result};
use crate::export::{self, SaveOptions};

/// Extra height per additional row, as a fraction of the preset height
pub const ROW_STRETCH: f64 = 0.25;

/// Named figure sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Small,
    Medium,
    Tall,
    Short,
    Wide,
    /// Page-sized; never stretched
    Full,
}

impl Preset {
    /// Figure size in inches for a layout with `rows` rows
    pub fn size_inches(&self, rows: usize, stretch: bool) -> (f64, f64) {
        let factor = 1.0 + (rows.max(1) - 1) as f64 * ROW_STRETCH * if stretch { 1.0 } else { 0.0 };
        match self {
            Preset::Small => (4.5, 3.0 * factor),
            Preset::Medium => (6.5, 4.0 * factor),
            Preset::Tall => (4.5, 5.5 * factor),
            Preset::Short => (7.0, 3.0 * factor),
            Preset::Wide => (11.0, (4.0 * factor).min(15.0)),
            Preset::Full => (16.0, 10.0),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(Preset::Small),
            "medium" => Ok(Preset::Medium),
            "tall" => Ok(Preset::Tall),
            "short" => Ok(Preset::Short),
            "wide" => Ok(Preset::Wide),
            "full" => Ok(Preset::Full),
            other => Err(format!(
                "unknown preset '{}' (expected small, medium, tall, short, wide or full)",
                other
            )),
        }
    }
}

/// The grid cells covered by one axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpan {
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

impl GridSpan {
    /// A single cell
    pub fn cell(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            row_span: 1,
            col_span: 1,
        }
    }
}

/// Handle to an axes owned by a [`Figure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxesId(usize);

/// Axes handles created by [`Figure::subplots`], in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxesGrid {
    rows: usize,
    cols: usize,
    ids: Vec<AxesId>,
}

impl AxesGrid {
    /// Handle at `(row, col)`
    pub fn at(&self, row: usize, col: usize) -> Option<AxesId> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.ids.get(row * self.cols + col).copied()
    }

    /// Handle of the top-left axes
    pub fn first(&self) -> AxesId {
        self.ids[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = AxesId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A drawing surface with one or more plot areas
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    width_in: f64,
    height_in: f64,
    rows: usize,
    cols: usize,
    axes: Vec<Axes>,
    /// Reduce spacing between plot areas
    pub tight_layout: bool,
    /// Paint an opaque white background behind everything
    pub fill_background: bool,
}

impl Figure {
    /// Create an empty figure whose axes are added with [`Figure::grid_plot`]
    pub fn new(preset: Preset, rows: usize, cols: usize, stretch: bool) -> Self {
        let rows = rows.max(1);
        let (width_in, height_in) = preset.size_inches(rows, stretch);
        Self {
            width_in,
            height_in,
            rows,
            cols: cols.max(1),
            axes: vec![],
            tight_layout: false,
            fill_background: true,
        }
    }

    /// Create a figure with a full `rows × cols` grid of axes
    pub fn subplots(preset: Preset, rows: usize, cols: usize, stretch: bool) -> (Self, AxesGrid) {
        let mut figure = Self::new(preset, rows, cols, stretch);
        let mut ids = Vec::with_capacity(figure.rows * figure.cols);
        for row in 0..figure.rows {
            for col in 0..figure.cols {
                ids.push(figure.push_axes(GridSpan::cell(row, col)));
            }
        }
        let grid = AxesGrid {
            rows: figure.rows,
            cols: figure.cols,
            ids,
        };
        (figure, grid)
    }

    /// Single-axes shorthand for [`Figure::subplots`]
    pub fn single(preset: Preset) -> (Self, AxesId) {
        let (figure, grid) = Self::subplots(preset, 1, 1, true);
        (figure, grid.first())
    }

    /// Add an axes spanning `size = (rows, cols)` cells from `position = (row, col)`
    pub fn grid_plot(&mut self, position: (usize, usize), size: (usize, usize)) -> Result<AxesId> {
        let (row, col) = position;
        let (row_span, col_span) = size;
        if row_span == 0 || col_span == 0 || row + row_span > self.rows || col + col_span > self.cols
        {
            return Err(Error::InvalidGridSpan {
                position,
                span: size,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.push_axes(GridSpan {
            row,
            col,
            row_span,
            col_span,
        }))
    }

    fn push_axes(&mut self, span: GridSpan) -> AxesId {
        self.axes.push(Axes::new(span));
        AxesId(self.axes.len() - 1)
    }

    pub fn axes(&self, id: AxesId) -> Result<&Axes> {
        self.axes.get(id.0).ok_or(Error::UnknownAxes(id))
    }

    pub fn axes_mut(&mut self, id: AxesId) -> Result<&mut Axes> {
        self.axes.get_mut(id.0).ok_or(Error::UnknownAxes(id))
    }

    /// All plot areas in creation order
    pub fn all_axes(&self) -> &[Axes] {
        &self.axes
    }

    pub fn all_axes_mut(&mut self) -> &mut [Axes] {
        &mut self.axes
    }

    /// Size in inches
    pub fn size_inches(&self) -> (f64, f64) {
        (self.width_in, self.height_in)
    }

    pub fn set_size_inches(&mut self, width: f64, height: f64) {
        self.width_in = width;
        self.height_in = height;
    }

    /// Grid dimensions as `(rows, cols)`
    pub fn grid_shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Style and write this figure; see [`export::save`]
    pub fn save(self, path: impl AsRef<Path>, options: SaveOptions) -> Result<Vec<PathBuf>> {
        export::save(path, self, options)
    }
}
