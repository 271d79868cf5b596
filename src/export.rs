//! Multi-format figure export
//!
//! The output path's extension decides what gets written:
//!
//! - `.png`: a raster image (and, unless a dpi was given, a `@2x.png` twin)
//! - `.svg`: a vector image
//! - anything else: `<path>.svg`, `<path>.png`, `<path>@2x.png` and a
//!   black-and-white `<path>.mono.svg` for print

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::figure::{Figure, Legend};
use crate::renderer::{pixel_size, render_svg, svg_to_png, ChartConfig};
use crate::style::{apply_style, StyleOptions};
use crate::stylesheet::HouseStyle;

/// Raster density for plain `.png` output
pub const DEFAULT_DPI: u32 = 90;

/// Raster density for `@2x.png` output
pub const RETINA_DPI: u32 = 180;

/// Options for [`save`]
#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub legend: Legend,
    /// Explicit raster density; `None` picks 90 or 180 from the path
    pub dpi: Option<u32>,
    pub style_offset: usize,
    pub house: HouseStyle,
    pub chart: ChartConfig,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            legend: Legend::Auto,
            dpi: None,
            style_offset: 0,
            house: HouseStyle::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl SaveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = legend;
        self
    }

    /// Request an explicit density; zero means automatic
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = if dpi == 0 { None } else { Some(dpi) };
        self
    }

    pub fn with_style_offset(mut self, offset: usize) -> Self {
        self.style_offset = offset;
        self
    }

    pub fn with_house_style(mut self, house: HouseStyle) -> Self {
        self.house = house;
        self
    }

    pub fn with_chart(mut self, chart: ChartConfig) -> Self {
        self.chart = chart;
        self
    }
}

/// Style `figure` and write it to `path`, returning every file written
///
/// The figure is consumed: once exported it is released. A house style that
/// fails validation is rejected before anything is written.
pub fn save(path: impl AsRef<Path>, mut figure: Figure, options: SaveOptions) -> Result<Vec<PathBuf>> {
    options.house.validate()?;
    let prefix = path.as_ref().to_string_lossy().into_owned();
    let mut written = vec![];
    export(&prefix, &mut figure, &options, &mut written)?;
    tracing::debug!(files = written.len(), "figure released");
    Ok(written)
}

fn export(
    prefix: &str,
    figure: &mut Figure,
    options: &SaveOptions,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let dpi = options.dpi.unwrap_or(if prefix.contains("@2x.png") {
        RETINA_DPI
    } else {
        DEFAULT_DPI
    });

    ensure_parent_dir(Path::new(prefix))?;

    if figure.all_axes().len() > 1 {
        figure.tight_layout = true;
    }

    let color = StyleOptions::color()
        .with_legend(options.legend)
        .with_style_offset(options.style_offset);
    apply_style(figure, &color, &options.house);

    match extension(prefix).as_str() {
        "png" => write_png(prefix, figure, dpi, options, written)?,
        "svg" => write_svg(prefix, figure, options, written)?,
        _ => {
            write_svg(&format!("{}.svg", prefix), figure, options, written)?;
            figure.fill_background = true;
            write_png(&format!("{}.png", prefix), figure, DEFAULT_DPI, options, written)?;
            write_png(&format!("{}@2x.png", prefix), figure, RETINA_DPI, options, written)?;

            let mono = StyleOptions::mono().with_legend(options.legend);
            apply_style(figure, &mono, &options.house);
            write_svg(&format!("{}.mono.svg", prefix), figure, options, written)?;
        }
    }

    if prefix.contains(".png") && !prefix.contains('@') && options.dpi.is_none() {
        let retina = SaveOptions {
            dpi: Some(dpi * 2),
            ..options.clone()
        };
        export(&prefix.replace(".png", "@2x.png"), figure, &retina, written)?;
    }
    Ok(())
}

/// Lowercased text after the last dot of the whole path
fn extension(prefix: &str) -> String {
    prefix.rsplit('.').next().unwrap_or_default().to_lowercase()
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    Ok(())
}

fn write_svg(
    path: &str,
    figure: &Figure,
    options: &SaveOptions,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let svg = render_svg(figure, &options.house, &options.chart)?;
    fs::write(path, svg).map_err(|e| Error::io(path, e))?;
    record(path, written);
    Ok(())
}

fn write_png(
    path: &str,
    figure: &Figure,
    dpi: u32,
    options: &SaveOptions,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let svg = render_svg(figure, &options.house, &options.chart)?;
    let (width_in, height_in) = figure.size_inches();
    let (width, height) = pixel_size(width_in, height_in, dpi);
    tracing::debug!(path, dpi, width, height, "rasterizing figure");
    svg_to_png(&svg, width, height, Path::new(path))?;
    record(path, written);
    Ok(())
}

fn record(path: &str, written: &mut Vec<PathBuf>) {
    println!("{}", path);
    written.push(PathBuf::from(path));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(extension("out/chart.PNG"), "png");
        assert_eq!(extension("out/chart.svg"), "svg");
        assert_eq!(extension("out/chart"), "out/chart");
        assert_eq!(extension("v1.2/chart"), "2/chart");
    }

    #[test]
    fn test_with_dpi_zero_is_automatic() {
        assert_eq!(SaveOptions::new().with_dpi(0).dpi, None);
        assert_eq!(SaveOptions::new().with_dpi(300).dpi, Some(300));
    }
}
