//! SVG generation from figures

use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::stylesheet::HouseStyle;

use super::chart::{draw_figure, POINTS_PER_INCH};
use super::ChartConfig;

/// Render a figure to an SVG document sized in points
///
/// Plotters draws on a grid `config.scale` times finer than a point; the
/// root element's `viewBox` maps that grid back onto the point size.
pub fn render_svg(figure: &Figure, house: &HouseStyle, config: &ChartConfig) -> Result<String> {
    let (width_in, height_in) = figure.size_inches();
    let width = width_in * POINTS_PER_INCH;
    let height = height_in * POINTS_PER_INCH;
    let render_size = (config.units(width).max(1), config.units(height).max(1));

    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, render_size).into_drawing_area();
        draw_figure(&root, figure, house, config).map_err(draw_error)?;
        root.present().map_err(draw_error)?;
    }
    rewrite_svg_header(&mut buf, (width, height), render_size);
    if config.xml_declaration {
        buf.insert_str(0, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }
    Ok(buf)
}

fn draw_error(e: impl std::fmt::Display) -> Error {
    Error::Draw(e.to_string())
}

/// Replace the backend's pixel-sized root tag with a point-sized one
fn rewrite_svg_header(buf: &mut String, size: (f64, f64), render_size: (u32, u32)) {
    if let Some(pos) = buf.find('>') {
        let header = format!(
            "<svg width=\"{}pt\" height=\"{}pt\" viewBox=\"0 0 {} {}\" xmlns=\"http://www.w3.org/2000/svg\"",
            num(size.0),
            num(size.1),
            render_size.0,
            render_size.1
        );
        buf.replace_range(..pos, &header);
    }
}

/// Format a length with at most two decimals
fn num(v: f64) -> String {
    let text = format!("{:.2}", v);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
