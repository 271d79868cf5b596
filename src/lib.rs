//! Article Charts - house-styled charts and tables for documentation articles
//!
//! This library provides a figure factory with fixed size presets, a styling
//! engine that assigns colours and dash patterns by line position, a
//! multi-format exporter (SVG, PNG at two densities and a monochrome print
//! SVG), an animation-to-video pipeline and an HTML/CSV table emitter.
//!
//! # Example
//!
//! ```rust,no_run
//! use article_charts::{Figure, Preset, SaveOptions};
//!
//! let (mut figure, id) = Figure::single(Preset::Medium);
//! let axes = figure.axes_mut(id)?;
//! let x: Vec<f64> = (0..100).map(|i| i as f64 / 99.0).collect();
//! for power in 1..=3 {
//!     let y: Vec<f64> = x.iter().map(|v| v.powi(power)).collect();
//!     axes.plot(&x, &y).label(format!("y = x^{}", power));
//! }
//! figure.save("out/powers", SaveOptions::default())?;
//! # Ok::<(), article_charts::Error>(())
//! ```

pub mod animate;
pub mod csv_data;
pub mod demo;
pub mod error;
pub mod export;
pub mod figure;
pub mod phase;
pub mod progress;
pub mod renderer;
pub mod style;
pub mod stylesheet;
pub mod table;

pub use animate::{animate, Animation, AnimationConfig, FrameSpan};
pub use csv_data::{read_csv, CsvData};
pub use error::{Error, Result};
pub use export::{save, SaveOptions};
pub use figure::{
    Axes, AxesGrid, AxesId, Figure, Legend, LegendLocation, Line, Preset, Rgb,
};
pub use phase::unwrap_phase;
pub use progress::{progress, progress_done};
pub use renderer::{render_svg, ChartConfig};
pub use style::{apply_style, StyleOptions};
pub use stylesheet::HouseStyle;
pub use table::{Column, Table, TableFiles};
