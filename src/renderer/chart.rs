//! Figure drawing on a plotters backend
//!
//! Each axes gets a region of the root area and is drawn as one cartesian
//! chart: patch, mesh (grid, ticks and labels), lines by zorder, spines and
//! legend. All lengths are given in points and converted to backend units
//! through [`ChartConfig`].

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::figure::{Axes, BoundingBox, Figure, GridSpan, LegendLocation, Line, Point, Rgb};
use crate::stylesheet::HouseStyle;

use super::path::StyledPath;
use super::ChartConfig;

/// SVG user units per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Spacing between subplots in loose layouts, as a fraction of a cell
const SUBPLOT_SPACING: f64 = 0.2;

const TICK_LENGTH: f64 = 3.5;
const SPINE_WIDTH: f64 = 0.8;

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Draw every axes of `figure` onto `root`
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    house: &HouseStyle,
    config: &ChartConfig,
) -> DrawResult<DB> {
    if figure.fill_background {
        root.fill(&WHITE)?;
    }
    let (width, height) = root.dim_in_pixel();
    let regions = axes_regions(figure, config);
    for (axes, region) in figure.all_axes().iter().zip(regions) {
        let left = config.units(region.x);
        let top = config.units(region.y);
        let right = width.saturating_sub(left + config.units(region.width));
        let bottom = height.saturating_sub(top + config.units(region.height));
        let area = root.margin(top, bottom, left, right);
        draw_axes(&area, axes, house, config)?;
    }
    Ok(())
}

/// Regions in points, one per axes in figure order
///
/// Each region holds the plot area together with its ticks, labels and title.
pub fn axes_regions(figure: &Figure, config: &ChartConfig) -> Vec<BoundingBox> {
    let (width_in, height_in) = figure.size_inches();
    let page = BoundingBox::new(0.0, 0.0, width_in * POINTS_PER_INCH, height_in * POINTS_PER_INCH);
    let (rows, cols) = figure.grid_shape();
    let (pad, spacing) = if figure.tight_layout {
        (config.tight_pad, 0.0)
    } else {
        (config.tight_pad * 2.0, SUBPLOT_SPACING)
    };
    let region = page.inset(pad, pad, pad, pad);
    figure
        .all_axes()
        .iter()
        .map(|axes| grid_cell(region, rows, cols, axes.span(), spacing))
        .collect()
}

/// Rectangle covered by a grid span, with `spacing` gaps between cells
fn grid_cell(region: BoundingBox, rows: usize, cols: usize, span: GridSpan, spacing: f64) -> BoundingBox {
    let cell_w = region.width / (cols as f64 + spacing * (cols as f64 - 1.0));
    let cell_h = region.height / (rows as f64 + spacing * (rows as f64 - 1.0));
    let gap_w = spacing * cell_w;
    let gap_h = spacing * cell_h;
    BoundingBox::new(
        region.x + span.col as f64 * (cell_w + gap_w),
        region.y + span.row as f64 * (cell_h + gap_h),
        span.col_span as f64 * cell_w + (span.col_span as f64 - 1.0) * gap_w,
        span.row_span as f64 * cell_h + (span.row_span as f64 - 1.0) * gap_h,
    )
}

fn draw_axes<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    axes: &Axes,
    house: &HouseStyle,
    config: &ChartConfig,
) -> DrawResult<DB> {
    let family = house.font_family_css();
    let font = |points: f64| points * config.scale as f64;
    let font_size = house.font_size;
    let tick_font = font_size * 0.83;
    let label_band = font_size * 1.4;

    let x_label_area = TICK_LENGTH + tick_font * 1.6 + axes.xlabel.as_ref().map_or(0.0, |_| label_band);
    let y_label_area = TICK_LENGTH + tick_font * 3.2 + axes.ylabel.as_ref().map_or(0.0, |_| label_band);

    let ((x0, x1), (y0, y1)) = axes.view_limits();
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(config.units(font_size * 0.5))
        .margin_right(config.units(font_size))
        .x_label_area_size(config.units(x_label_area))
        .y_label_area_size(config.units(y_label_area));
    if let Some(title) = &axes.title {
        builder.caption(title, (family.as_str(), font(font_size * 1.2)));
    }
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    chart.plotting_area().fill(&WHITE.mix(axes.patch_alpha))?;

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(config.tick_labels)
        .y_labels(config.tick_labels)
        .light_line_style(TRANSPARENT)
        .bold_line_style(BLACK.mix(axes.grid.alpha).stroke_width(config.stroke(axes.grid.line_width)))
        .axis_style(BLACK.stroke_width(config.stroke(SPINE_WIDTH)))
        .set_all_tick_mark_size(config.units(TICK_LENGTH))
        .label_style((family.as_str(), font(tick_font)))
        .axis_desc_style((family.as_str(), font(font_size)))
        .x_label_formatter(&tick_label)
        .y_label_formatter(&tick_label);
    if !axes.grid.is_visible() {
        mesh.disable_mesh();
    }
    if let Some(label) = &axes.xlabel {
        mesh.x_desc(label.as_str());
    }
    if let Some(label) = &axes.ylabel {
        mesh.y_desc(label.as_str());
    }
    mesh.draw()?;

    let mut order: Vec<&Line> = axes.lines.iter().collect();
    order.sort_by(|a, b| a.style.zorder.total_cmp(&b.style.zorder));
    for line in order {
        let style = line_style(line, config);
        let dashes = scaled_dashes(line, config);
        chart.draw_series(
            line.segments()
                .filter(|run| run.len() > 1)
                .map(|run| StyledPath::new(run.iter().map(|p| (p.x, p.y)).collect(), style, dashes.clone())),
        )?;
    }

    chart.draw_series(std::iter::once(Rectangle::new(
        [(x0, y0), (x1, y1)],
        BLACK.stroke_width(config.stroke(SPINE_WIDTH)),
    )))?;

    let Some(legend) = axes.legend.as_ref().filter(|l| l.visible) else {
        return Ok(());
    };
    let entries: Vec<&Line> = axes.lines.iter().filter(|l| l.label_text().is_some()).collect();
    if entries.is_empty() {
        return Ok(());
    }

    let legend_font = font_size * 0.9;
    let sample = config.units(legend_font * 2.0);
    let margin = config.units(legend_font * 0.5);
    for line in &entries {
        let style = line_style(line, config);
        let dashes = scaled_dashes(line, config);
        let length = sample as i32;
        chart
            .draw_series(std::iter::empty::<StyledPath<(f64, f64)>>())?
            .label(line.label_text().unwrap_or_default())
            .legend(move |(x, y)| StyledPath::new(vec![(x, y), (x + length, y)], style, dashes.clone()));
    }

    let location = match legend.location {
        LegendLocation::Best => {
            let points: Vec<Point> = axes
                .lines
                .iter()
                .flat_map(|l| l.points().iter())
                .filter(|p| p.is_finite())
                .map(|p| {
                    let (x, y) = chart.backend_coord(&(p.x, p.y));
                    Point::new(x as f64, y as f64)
                })
                .collect();
            let (xr, yr) = chart.plotting_area().get_pixel_range();
            let frame = BoundingBox::new(
                xr.start as f64,
                yr.start as f64,
                (xr.end - xr.start) as f64,
                (yr.end - yr.start) as f64,
            );
            let widest = entries
                .iter()
                .filter_map(|l| l.label_text())
                .map(|t| t.chars().count())
                .max()
                .unwrap_or(0);
            let size = (
                (sample + margin * 2) as f64 + font(legend_font) * (0.6 * widest as f64 + 1.0) + 2.0 * margin as f64,
                font(legend_font) * 1.4 * entries.len() as f64 + 2.0 * margin as f64,
            );
            best_legend_location(&points, frame, size, margin as f64)
        }
        other => other,
    };

    chart
        .configure_series_labels()
        .position(label_position(location))
        .margin(margin)
        .legend_area_size(sample + margin * 2)
        .background_style(WHITE.mix(legend.frame_alpha))
        .border_style(rgb(legend.edge_color).stroke_width(config.stroke(legend.edge_width)))
        .label_font((family.as_str(), font(legend_font)))
        .draw()?;
    Ok(())
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn line_style(line: &Line, config: &ChartConfig) -> ShapeStyle {
    rgb(line.style.color).stroke_width(config.stroke(line.style.width))
}

/// Dash lengths converted from points to backend units
fn scaled_dashes(line: &Line, config: &ChartConfig) -> Option<Vec<f64>> {
    line.style
        .dashes
        .as_ref()
        .map(|d| d.iter().map(|v| v * config.scale as f64).collect())
}

fn label_position(location: LegendLocation) -> SeriesLabelPosition {
    match location {
        LegendLocation::UpperRight | LegendLocation::Best => SeriesLabelPosition::UpperRight,
        LegendLocation::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendLocation::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendLocation::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

/// Tick text: up to six decimals, exponent form for very large or small values
fn tick_label(value: &f64) -> String {
    let v = *value;
    let magnitude = v.abs();
    if magnitude >= 1e6 || (magnitude > 0.0 && magnitude < 1e-4) {
        return format!("{:.2e}", v);
    }
    let text = format!("{:.6}", v);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Candidate corners for a `Best` legend, in preference order
const BEST_CANDIDATES: [LegendLocation; 4] = [
    LegendLocation::UpperRight,
    LegendLocation::UpperLeft,
    LegendLocation::LowerLeft,
    LegendLocation::LowerRight,
];

/// Corner whose legend box covers the fewest plotted points
///
/// `points` and `frame` share one coordinate space with y growing downwards.
pub fn best_legend_location(
    points: &[Point],
    frame: BoundingBox,
    legend_size: (f64, f64),
    margin: f64,
) -> LegendLocation {
    let (w, h) = legend_size;
    let left = frame.x + margin;
    let right = frame.right() - margin - w;
    let top = frame.y + margin;
    let bottom = frame.bottom() - margin - h;

    let mut best = LegendLocation::UpperRight;
    let mut best_count = usize::MAX;
    for candidate in BEST_CANDIDATES {
        let (x, y) = match candidate {
            LegendLocation::UpperLeft => (left, top),
            LegendLocation::LowerLeft => (left, bottom),
            LegendLocation::LowerRight => (right, bottom),
            _ => (right, top),
        };
        let rect = BoundingBox::new(x, y, w, h);
        let count = points.iter().filter(|p| rect.contains(**p)).count();
        if count < best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}
