//! Figure renderer
//!
//! Figures are drawn through plotters onto an SVG backend sized in points
//! (72 per inch); raster output is produced by rasterizing that SVG at the
//! requested pixel density.

pub mod chart;
pub mod config;
pub mod path;
pub mod raster;
pub mod svg;

pub use chart::{best_legend_location, POINTS_PER_INCH};
pub use config::ChartConfig;
pub use raster::{pixel_size, png_dimensions, svg_to_png};
pub use svg::render_svg;
